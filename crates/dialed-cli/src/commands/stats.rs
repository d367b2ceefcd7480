use anyhow::Result;

use dialed_application::PracticeTracker;
use dialed_core::state::StatsSnapshot;
use dialed_core::stats::DistanceStat;

use crate::StatsView;

fn distance_table(rows: &[DistanceStat]) {
    for row in rows {
        println!(
            "    {:>3}ft  {:>4}/{:<4} {:>3}%",
            row.distance, row.made, row.attempts, row.pct
        );
    }
}

fn streak(stats: &StatsSnapshot) {
    let summary = &stats.streak;
    println!("🔥 Streak: {} days (longest {})", summary.streak, stats.longest_streak);
    println!("   {}: {}", summary.milestone.title, summary.milestone.msg);

    let detail = &stats.streak_stats;
    if detail.current > 0 {
        println!(
            "   Streak putting: {}/{} ({}%)",
            detail.made, detail.att, detail.pct
        );
        println!("   Daily trend: {:?}", detail.daily_trend);
        distance_table(&detail.dist_data);
    }
}

fn practice(stats: &StatsSnapshot) {
    let Some(trends) = &stats.practice else {
        println!("🥏 No practice sessions yet");
        return;
    };
    println!("🥏 Practice: {}% overall", trends.overall_pct);
    println!("   Last sessions: {:?}", trends.session_trend);
    if let Some(best) = trends.best_dist {
        println!("   Best distance: {}ft at {}%", best.distance, best.pct);
    }
    distance_table(&trends.distances);
}

fn league(stats: &StatsSnapshot) {
    let Some(trends) = &stats.league else {
        println!("🏆 No league nights yet");
        return;
    };
    println!(
        "🏆 League: season average {}, personal best {}",
        trends.season_avg, trends.personal_best
    );
    if let Some(trend) = trends.trend {
        println!(
            "   Last night {} ({} vs {})",
            trend.display_diff(),
            trend.latest_total,
            trend.previous_total
        );
    }
    if trends.has_granular {
        println!("   Round averages: {:?}", trends.averages);
        println!("   Circle 1: {}%  Circle 2: {}%", trends.c1.pct, trends.c2.pct);
    }
}

fn world(stats: &StatsSnapshot) {
    match stats.world {
        Some(world) => println!(
            "🌍 World: {} games, {}% accuracy, peak {}ft",
            world.session_count, world.accuracy, world.peak_distance
        ),
        None => println!("🌍 No World games yet"),
    }
}

fn pro(stats: &StatsSnapshot) {
    match stats.pro {
        Some(pro) => {
            println!(
                "🎯 Pro: cold start {}% over {} rounds",
                pro.cold_start_pct, pro.total_cold_starts
            );
            println!("   By putt: {:?}", pro.position_pcts);
        }
        None => println!("🎯 No Pro-scored rounds yet"),
    }
}

pub async fn show(tracker: &PracticeTracker, view: Option<StatsView>, json: bool) -> Result<()> {
    let stats = tracker.stats().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    match view {
        Some(StatsView::Streak) => streak(&stats),
        Some(StatsView::Practice) => practice(&stats),
        Some(StatsView::League) => league(&stats),
        Some(StatsView::World) => world(&stats),
        Some(StatsView::Pro) => pro(&stats),
        None => {
            streak(&stats);
            practice(&stats);
            league(&stats);
            world(&stats);
            pro(&stats);
        }
    }
    Ok(())
}
