use arcade_bandit::prelude::*;

fn main() -> arcade_bandit::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = TreasureHuntConfig {
        seed: 2024,
        ..TreasureHuntConfig::default()
    };

    println!("Treasure hunt over {} rounds", config.rounds);
    println!("Quadrant probabilities: {:?}\n", config.probabilities);

    let mut aps = TreasureHunt::new(config.clone(), AdaptivePlay::new(4, 0.05)?)?;
    let summary = aps.run()?;
    println!("Adaptive Play");
    println!("  Treasures found: {}", summary.treasures_found);
    println!("  Quadrant pulls: {:?}", summary.pulls);
    println!("  Cumulative regret: {:.1}", summary.cumulative_regret);
    println!("  Final weights: {:?}", aps.bandit().policy().weights());

    let mut ucb = TreasureHunt::new(config, Ucb::new(4)?)?;
    let summary = ucb.run()?;
    println!("\nUCB1");
    println!("  Treasures found: {}", summary.treasures_found);
    println!("  Quadrant pulls: {:?}", summary.pulls);
    println!("  Cumulative regret: {:.1}", summary.cumulative_regret);
    println!("  Final estimates: {:?}", ucb.bandit().policy().estimates());

    Ok(())
}
