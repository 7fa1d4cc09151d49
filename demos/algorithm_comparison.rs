use arcade_bandit::prelude::*;
use rand::SeedableRng;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Arcade Bandit: Adaptive Play vs UCB1\n");
    println!("{}", "=".repeat(60));

    // Define the true reward probabilities for each arm
    let probabilities = vec![0.4, 0.5, 0.6, 0.7];
    let env = BernoulliArms::new(probabilities.clone()).unwrap();

    println!("True reward probabilities:");
    for (arm, p) in probabilities.iter().enumerate() {
        println!("  Arm {}: {:.2}", arm, p);
    }
    println!("\nBest arm: Arm 3 (0.70)\n");
    println!("{}", "=".repeat(60));

    let contenders = [
        ("Adaptive Play (eta = 0.05)", LearningPolicy::AdaptivePlay { eta: 0.05 }),
        ("Adaptive Play (eta = 0.08)", LearningPolicy::AdaptivePlay { eta: 0.08 }),
        ("UCB1", LearningPolicy::Ucb),
    ];

    for (name, policy) in contenders {
        println!("\n{}", name);
        println!("{}", "-".repeat(name.len()));

        let mut bandit = Bandit::builder()
            .arms(probabilities.len())
            .policy(policy)
            .seed(42)
            .build()
            .unwrap();
        let mut tracker = RegretTracker::new(probabilities.clone()).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut total_reward = 0.0;
        let mut selections = vec![0usize; probabilities.len()];

        // Simulate 3000 rounds
        for _ in 0..3000 {
            let arm = bandit.select();
            selections[arm] += 1;

            let reward = env.pull(arm, &mut rng).unwrap();
            total_reward += reward.value();

            bandit.update(arm, reward).unwrap();
            tracker.record_round(arm).unwrap();
        }

        println!("  Total reward: {:.0}/3000", total_reward);
        println!("  Cumulative regret: {:.1}", tracker.cumulative_regret());
        println!("  Arm selection counts:");
        for (arm, count) in selections.iter().enumerate() {
            println!("    Arm {}: {} ({:.1}%)", arm, count, *count as f64 / 30.0);
        }
        println!("  Final expectations:");
        for (arm, value) in bandit.expectations().iter().enumerate() {
            println!("    Arm {}: {:.3}", arm, value);
        }
        for checkpoint in [100, 500, 1000, 3000] {
            println!(
                "  Regret after {:>4} rounds: {:.1}",
                checkpoint,
                tracker.history()[checkpoint - 1]
            );
        }
    }
}
