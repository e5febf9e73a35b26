use app_baseball_client::SkillCategory;
use rmcp::model::{GetPromptResult, PromptMessage, PromptMessageRole};

pub fn player_growth_review_prompt(player_id: &str) -> GetPromptResult {
    GetPromptResult::new(vec![PromptMessage::new_text(
            PromptMessageRole::User,
            format!(
                "Review how player {} is progressing.\n\nLevels run from 10 (introductory) to 1 (mastery), so a lower number is further along.\n\nDo the following:\n1. Fetch the player with get_player and the focus skill with recommend_for_player.\n2. For each skill, use describe_level to explain what the player can do now and what the next level asks for.\n3. Read recent practice with list_practice_logs (player_id={}) and note mood and fatigue trends.\n4. Summarize one strength and one thing to work on, in plain words a parent and a child can follow.\n\nKeep it encouraging and specific.",
                player_id, player_id
            ),
        )])
    .with_description(format!("Growth review for player {}", player_id))
}

pub fn weekly_practice_plan_prompt(
    player_id: &str,
    days_per_week: u32,
    focus: Option<SkillCategory>,
) -> GetPromptResult {
    let focus_step = match focus {
        Some(category) => format!(
            "Center the week on {} ({}): use pick_menu for it at the player's current level from recommend_for_player, then pick_menu for the other skills.",
            category.label(),
            category.key()
        ),
        None => "Use recommend_for_player to find the focus skill and its training menu, then pick_menu for the other skills at their current levels.".to_string(),
    };
    GetPromptResult::new(vec![PromptMessage::new_text(
            PromptMessageRole::User,
            format!(
                "Plan {} days of home practice this week for player {}.\n\n{} Spend most sessions on the focus skill and rotate the rest. Keep each session under 20 minutes, list the drills by name from the menus, and finish with one baseball IQ or manners activity.\n\nIf the latest daily report (get_latest_daily_report) shows high fatigue, make the first day lighter.",
                days_per_week, player_id, focus_step
            ),
        )])
    .with_description(format!(
        "Weekly practice plan for player {} ({} days)",
        player_id, days_per_week
    ))
}
