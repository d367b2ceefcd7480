use anyhow::Result;

use dialed_application::PracticeTracker;
use dialed_core::scoring::ScoringStyle;
use dialed_core::user::UserRole;

pub async fn run(
    tracker: &PracticeTracker,
    style: Option<ScoringStyle>,
    onboarded: bool,
) -> Result<()> {
    let mut settings = tracker.state().await.document.settings;
    if let Some(style) = style {
        settings.scoring_style = style;
    }
    if onboarded {
        settings.has_completed_onboarding = true;
    }
    if style.is_some() || onboarded {
        tracker.update_settings(settings).await?;
        println!("✅ Settings saved");
    }

    println!("Scoring style: {:?}", settings.scoring_style);
    println!("Onboarding done: {}", settings.has_completed_onboarding);
    Ok(())
}

pub async fn role(tracker: &PracticeTracker, role: Option<UserRole>) -> Result<()> {
    if let Some(role) = role {
        tracker.set_role(role).await?;
    }
    match tracker.state().await.document.role {
        Some(role) => println!("Role: {:?}", role),
        None => println!("No role chosen yet (practice, league or coach)"),
    }
    Ok(())
}
