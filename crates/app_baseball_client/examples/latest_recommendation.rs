use app_baseball_client::{
    AppBaseballClient, Recommender, config::Config, http_client::ReqwestAppBaseballClient,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Usage: latest_recommendation <player_id>; backend from APP_BASEBALL_BASE_URL
    let Some(player_id) = std::env::args().nth(1) else {
        eprintln!("usage: latest_recommendation <player_id>");
        return Ok(());
    };
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = ReqwestAppBaseballClient::from_config(&cfg)?;
    let Some(snapshot) = client.get_latest_evaluation(&player_id).await? else {
        println!("No evaluation recorded for player {player_id}");
        return Ok(());
    };

    let recommender = Recommender::default();
    let focus = recommender.resolve_focus(&snapshot.values);
    println!("Focus: {} (level {})", focus.category.label(), focus.level);
    match focus.menu {
        Some(menu) => {
            println!("Menu: {}", menu.title);
            for item in &menu.items {
                println!("  - {item}");
            }
        }
        None => println!("No menu defined for this level"),
    }
    Ok(())
}
