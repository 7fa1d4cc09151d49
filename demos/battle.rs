use arcade_bandit::battle::Winner;
use arcade_bandit::prelude::*;

fn main() -> arcade_bandit::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = BattleConfig {
        seed: 7,
        ..BattleConfig::default()
    };
    let mut battle = Battle::adaptive(config, 0.08)?;

    while let Some(round) = battle.play_round()? {
        if round.round % 10 == 0 {
            println!(
                "round {:>3}: {:?} vs {:?} -> health {} / {}, regret {:.0}",
                round.round,
                round.player1_action,
                round.player2_action,
                round.player1.health,
                round.player2.health,
                round.cumulative_regret
            );
        }
    }

    let summary = battle.run()?;
    let outcome = match summary.winner {
        Some(Winner::Player1) => "player 1 wins",
        Some(Winner::Player2) => "player 2 wins",
        Some(Winner::Draw) => "draw",
        None => "round budget exhausted",
    };
    println!("\n{} after {} rounds", outcome, summary.rounds);
    println!("Player 2 cumulative regret: {:.0}", summary.cumulative_regret);
    println!(
        "Player 2 action probabilities: {:?}",
        battle.bandit().expectations()
    );

    Ok(())
}
