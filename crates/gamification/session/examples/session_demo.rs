//! Minimal wiring demo: file-backed store, system clock, console widgets.
//!
//! Run with `cargo run -p gamification-session --example session_demo`.
//! State lands in the platform data directory (system temp dir as a
//! fallback) so repeated runs show the daily bonus becoming unavailable and
//! the join counter climbing.

use gamification_session::{FileStore, GamificationController};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamification_session=debug".into()),
        )
        .init();

    let store = FileStore::in_project_dirs()
        .or_else(|_| FileStore::new(std::env::temp_dir().join("pingbadge-demo")))?;
    let mut controller = GamificationController::builder().store(store).build()?;

    controller.subscribe(|update| {
        for achievement in &update.new_achievements {
            println!(
                "  {} {} (+{} pts): {}",
                achievement.icon, achievement.name, achievement.points, achievement.description
            );
        }
    });

    controller.initialize("demo-user");

    if controller.check_daily_bonus()? {
        println!("daily bonus claimed, streak {} day(s)", controller.streak_days());
    } else {
        println!("daily bonus already claimed today");
    }

    for _ in 0..3 {
        controller.join_activity()?;
    }

    println!(
        "level {}: {} pts, {:.0}% toward {} pts",
        controller.current_level(),
        controller.total_points(),
        controller.progress_to_next_level(),
        controller.next_level_threshold(),
    );
    if let Some(benefit) = controller.level_benefits() {
        println!("perks: {}", benefit.benefits.join(", "));
    }

    controller.clear_achievements();
    Ok(())
}
