//! Property tests over the weather, prediction, and battery models.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use campus_energy_sim::devices::BatteryBank;
use campus_energy_sim::predict::{BatteryAction, predict};
use campus_energy_sim::predict::efficiency::wind_efficiency;
use campus_energy_sim::sim::power_balance::grid_exchange;
use campus_energy_sim::weather::{Season, WeatherCondition, WeatherSample, WeatherSynthesizer};

fn action() -> impl Strategy<Value = BatteryAction> {
    prop_oneof![
        Just(BatteryAction::ChargeNow),
        Just(BatteryAction::DischargeNow),
        Just(BatteryAction::Maintain),
        Just(BatteryAction::PrepareForPeak),
    ]
}

fn condition() -> impl Strategy<Value = WeatherCondition> {
    prop_oneof![
        Just(WeatherCondition::Sunny),
        Just(WeatherCondition::PartlyCloudy),
        Just(WeatherCondition::Cloudy),
        Just(WeatherCondition::Rainy),
        Just(WeatherCondition::Dusty),
        Just(WeatherCondition::ClearNight),
    ]
}

proptest! {
    #[test]
    fn efficiencies_stay_in_range(
        cond in condition(),
        temperature in -60.0f32..70.0,
        humidity in 0.0f32..=100.0,
        wind_speed in 0.0f32..80.0,
        cloud_cover in 0.0f32..=100.0,
        uv_index in 0.0f32..=11.0,
        visibility in 0.0f32..=100.0,
        month in 1u32..=12,
    ) {
        let weather = WeatherSample {
            condition: cond,
            temperature,
            humidity,
            wind_speed,
            cloud_cover,
            uv_index,
            visibility,
            ..WeatherSample::fallback()
        };
        let p = predict(&weather, &Season::from_month(month).profile(), None);
        prop_assert!((0.0..=1.0).contains(&p.solar_efficiency));
        prop_assert!((0.0..=1.0).contains(&p.wind_efficiency));
        prop_assert!((0.3..=2.5).contains(&p.load_multiplier));
        prop_assert!((5.0..=100.0).contains(&p.battery_optimal_charge));
    }

    #[test]
    fn calm_wind_is_fixed_floor(speed in 0.0f32..3.0, temperature in -60.0f32..70.0) {
        prop_assert_eq!(wind_efficiency(speed, temperature), 0.1);
    }

    #[test]
    fn battery_stays_clamped(
        start in 5.0f32..=100.0,
        steps in proptest::collection::vec((-500.0f32..500.0, 0.0f32..100.0, action()), 1..50),
    ) {
        let mut bank = BatteryBank::new(start);
        for (balance, optimal, act) in steps {
            let level = bank.advance(balance, optimal, act);
            prop_assert!((5.0..=100.0).contains(&level));
        }
    }

    #[test]
    fn import_and_export_exclusive(generation in 0.0f32..1000.0, load in 0.0f32..1000.0) {
        let g = grid_exchange(generation, load);
        prop_assert!(!(g.import_kw > 0.0 && g.export_kw > 0.0));
        prop_assert!(g.import_kw >= 0.0 && g.export_kw >= 0.0);
    }

    #[test]
    fn synthesized_night_is_clear(seed in any::<u64>(), hour in prop_oneof![0u32..6, 20u32..24], month in 1u32..=12) {
        let mut rng = StdRng::seed_from_u64(seed);
        let w = WeatherSynthesizer.synthesize(hour, Season::from_month(month), &mut rng);
        prop_assert_eq!(w.condition, WeatherCondition::ClearNight);
        prop_assert!(w.validate().is_ok());
    }

    #[test]
    fn synthesized_samples_are_valid(seed in any::<u64>(), hour in 0u32..24, month in 1u32..=12) {
        let mut rng = StdRng::seed_from_u64(seed);
        let w = WeatherSynthesizer.synthesize(hour, Season::from_month(month), &mut rng);
        prop_assert!(w.validate().is_ok());
        for h in w.forecast.horizons() {
            prop_assert!((0.0..=100.0).contains(&h.cloud_cover));
        }
    }
}
