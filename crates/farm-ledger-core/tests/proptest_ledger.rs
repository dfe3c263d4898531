use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use farm_ledger_core::barcode::{code128, generate_barcode};
use farm_ledger_core::insights::{due_today, due_within, score_answers, QUESTIONS};
use farm_ledger_core::models::VaccinationRecord;
use proptest::prelude::*;
use proptest::test_runner::Config;

fn record_due(next_date: NaiveDate) -> VaccinationRecord {
    VaccinationRecord {
        id: "1".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        animal_barcode: "PIG1".to_string(),
        animal_category: "Pig".to_string(),
        breed: "Duroc".to_string(),
        vaccine_name: "Swine Fever Vaccine".to_string(),
        doctor_name: "Dr. Ramesh Kumar".to_string(),
        next_date,
    }
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn barcode_prefix_follows_category(category in "[A-Za-z]{0,10}") {
        let barcode = generate_barcode(&category);
        if category.eq_ignore_ascii_case("pig") {
            prop_assert!(barcode.starts_with("PIG"));
        } else {
            prop_assert!(barcode.starts_with("PLT"));
        }
        prop_assert!(barcode[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn score_stays_in_range(ranks in prop::array::uniform5(0_usize..5)) {
        let answers: BTreeMap<String, String> = QUESTIONS
            .iter()
            .zip(ranks)
            .map(|(q, rank)| (q.id.to_string(), q.options[rank].to_string()))
            .collect();

        let score = score_answers(&answers).unwrap();
        prop_assert!(score <= 100);
        let total_rank: usize = ranks.iter().sum();
        prop_assert_eq!(score == 100, total_rank == 0);
        prop_assert_eq!(score == 0, total_rank == 20);
    }

    #[test]
    fn due_today_is_within_week(offset in 0_u64..30) {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let records = vec![record_due(today + Days::new(offset))];

        prop_assert_eq!(due_today(&records, today).len(), usize::from(offset == 0));
        prop_assert_eq!(due_within(&records, today, 7).len(), usize::from(offset <= 7));
    }

    #[test]
    fn code128_encodes_printable_ascii(text in "[ -~]{1,24}") {
        let modules = code128::encode(&text).unwrap();
        // start + data + checksum at 11 modules each, stop at 13
        prop_assert_eq!(modules.len(), (text.len() + 2) * 11 + 13);
    }
}
