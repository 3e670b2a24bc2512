//! End-to-end scenarios for the tokenomics engine
//!
//! These walk a creator token through derivation, re-verification, custom
//! schedules and milestone tracking the way the surrounding services do.

use social_tokenomics::{
    compute_tokenomics, evaluate_progress, validate_custom_tokenomics, CreatorMetrics,
    CustomMilestone, CustomTokenomicsInput, Tier, TokenomicsEngine, TokenomicsError,
    TokenomicsTier,
};

mod derivation_tests {
    use super::*;

    #[test]
    fn test_micro_creator() {
        let metrics = CreatorMetrics::new(15_000, 0.05, 60.0);
        let tokenomics = compute_tokenomics(&metrics, Tier::Micro).unwrap();

        assert!(tokenomics.total_supply > 5_000_000 && tokenomics.total_supply < 6_000_000);

        let decimals = tokenomics.initial_price.split('.').nth(1).unwrap().len();
        assert!((4..=6).contains(&decimals));

        let count = tokenomics.milestones.len();
        assert!((5..=8).contains(&count), "unexpected milestone count {}", count);
        assert!(tokenomics.milestones[0].holders < 500);
        assert!(tokenomics.milestones[0].reward < 0.10);
    }

    #[test]
    fn test_celebrity_is_a_formal_tier() {
        let metrics = CreatorMetrics::new(50_000_000, 0.02, 95.0);
        let mega = compute_tokenomics(&metrics, Tier::Mega).unwrap();
        let celebrity = compute_tokenomics(&metrics, Tier::Celebrity).unwrap();

        assert_eq!(celebrity.tier, TokenomicsTier::Scaled(Tier::Celebrity));
        assert!(celebrity.total_supply > mega.total_supply);
        assert!(celebrity.reward_multiplier > mega.reward_multiplier);
    }

    #[test]
    fn test_reverification_supersedes_record() {
        let engine = TokenomicsEngine::default();
        let before = engine
            .compute_tokenomics(&CreatorMetrics::new(8_000, 0.04, 35.0), Tier::Nano)
            .unwrap();
        let after = engine
            .compute_tokenomics(&CreatorMetrics::new(80_000, 0.06, 55.0), Tier::Micro)
            .unwrap();

        assert!(after.total_supply > before.total_supply);
        assert!(after.calculated_at >= before.calculated_at);
        assert!(after.milestones.iter().all(|m| !m.unlocked));
    }

    #[test]
    fn test_garbage_metrics_never_produce_a_record() {
        for metrics in [
            CreatorMetrics::new(1_000, f64::NAN, 10.0),
            CreatorMetrics::new(1_000, 0.1, f64::NEG_INFINITY),
            CreatorMetrics::new(1_000, -0.01, 10.0),
        ] {
            let err = compute_tokenomics(&metrics, Tier::Macro).unwrap_err();
            assert!(matches!(err, TokenomicsError::InvalidMetrics { .. }));
            assert_eq!(err.http_status(), 400);
        }
    }
}

mod progress_tests {
    use super::*;

    #[test]
    fn test_fresh_token_has_no_progress() {
        let tokenomics =
            compute_tokenomics(&CreatorMetrics::new(40_000, 0.03, 50.0), Tier::Macro).unwrap();
        let report = evaluate_progress(&tokenomics, 0);

        assert!(report.current_milestone.is_none());
        assert_eq!(report.next_milestone.as_ref(), tokenomics.milestones.first());
        assert_eq!(report.progress_percent, 0.0);
    }

    #[test]
    fn test_fully_grown_token() {
        let tokenomics =
            compute_tokenomics(&CreatorMetrics::new(40_000, 0.03, 50.0), Tier::Macro).unwrap();
        let last = tokenomics.final_milestone().unwrap().holders;

        for holders in [last, last * 3] {
            let report = evaluate_progress(&tokenomics, holders);
            assert!(report.next_milestone.is_none());
            assert_eq!(report.progress_percent, 100.0);
        }
    }

    #[test]
    fn test_tracker_lifecycle() {
        let mut tokenomics =
            compute_tokenomics(&CreatorMetrics::new(3_000, 0.08, 20.0), Tier::Nano).unwrap();
        let mut paid: Vec<u32> = Vec::new();

        for holders in [50, 120, 120, 260, 260, 900, 12_000, 12_000] {
            let report = evaluate_progress(&tokenomics, holders);
            for index in &report.pending_unlocks {
                paid.push(*index);
            }
            for milestone in tokenomics.milestones.iter_mut() {
                if report.pending_unlocks.contains(&milestone.index) {
                    milestone.unlocked = true;
                }
            }
        }

        // every milestone paid exactly once, in order
        assert_eq!(paid, (1..=7).collect::<Vec<u32>>());
    }
}

mod custom_tests {
    use super::*;

    fn request(total_supply: u64, initial_price: f64) -> CustomTokenomicsInput {
        CustomTokenomicsInput {
            total_supply,
            initial_price,
            milestones: vec![
                CustomMilestone { holders: 25, reward: 0.02 },
                CustomMilestone { holders: 100, reward: 0.05 },
                CustomMilestone { holders: 1_000, reward: 0.2 },
            ],
        }
    }

    #[test]
    fn test_custom_schedule_used_as_is() {
        let tokenomics = validate_custom_tokenomics(&request(2_000_000, 0.5)).unwrap();

        assert_eq!(tokenomics.tier, TokenomicsTier::Custom);
        assert_eq!(tokenomics.reward_multiplier, 1.0);
        assert_eq!(tokenomics.total_supply, 2_000_000);
        assert_eq!(
            tokenomics.milestones.iter().map(|m| m.holders).collect::<Vec<_>>(),
            vec![25, 100, 1_000]
        );
        assert_eq!(tokenomics.reward_tokens(3), Some(400_000));

        let report = evaluate_progress(&tokenomics, 50);
        assert_eq!(report.current_index(), 1);
        assert_eq!(report.progress_percent, 50.0);
    }

    #[test]
    fn test_custom_boundaries() {
        assert!(matches!(
            validate_custom_tokenomics(&request(999, 0.5)),
            Err(TokenomicsError::InvalidSupply { .. })
        ));
        assert!(validate_custom_tokenomics(&request(1_000, 0.5)).is_ok());
        assert!(matches!(
            validate_custom_tokenomics(&request(1_000, 100.5)),
            Err(TokenomicsError::InvalidPrice { .. })
        ));

        let mut low_reward = request(1_000, 0.5);
        low_reward.milestones[0].reward = 0.005;
        assert!(matches!(
            validate_custom_tokenomics(&low_reward),
            Err(TokenomicsError::InvalidMilestone { index: 1, .. })
        ));

        low_reward.milestones[0].reward = 0.01;
        assert!(validate_custom_tokenomics(&low_reward).is_ok());

        let mut falling = request(1_000, 0.5);
        falling.milestones[2].reward = 0.05;
        assert!(matches!(
            validate_custom_tokenomics(&falling),
            Err(TokenomicsError::InvalidMilestone { index: 3, .. })
        ));
    }

    #[test]
    fn test_custom_wire_format() {
        let input: CustomTokenomicsInput = serde_json::from_str(
            r#"{"totalSupply": 10000, "initialPrice": 0.02,
                "milestones": [{"holders": 10, "reward": 0.5}]}"#,
        )
        .unwrap();

        let tokenomics = validate_custom_tokenomics(&input).unwrap();
        let value = serde_json::to_value(&tokenomics).unwrap();
        assert_eq!(value["tier"], "custom");
        assert_eq!(value["rewardMultiplier"], 1.0);
    }
}
