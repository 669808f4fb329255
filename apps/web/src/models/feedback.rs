use serde::{Deserialize, Serialize};

/// Lowest rating shown in the testimonials list.
pub const MIN_DISPLAY_RATING: u8 = 4;
/// Testimonials shown at once.
pub const MAX_DISPLAYED: usize = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Feedback {
    #[serde(deserialize_with = "super::null_as_default")]
    pub customer_name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub rating: u8,
    #[serde(deserialize_with = "super::null_as_default")]
    pub comment: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub email: String,
}

/// Keeps the first few well-rated entries, in backend order.
pub fn select_for_display(entries: &[Feedback]) -> Vec<Feedback> {
    entries
        .iter()
        .filter(|f| f.rating >= MIN_DISPLAY_RATING)
        .take(MAX_DISPLAYED)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(name: &str, rating: u8) -> Feedback {
        Feedback {
            customer_name: name.into(),
            rating,
            comment: "ok".into(),
            email: format!("{name}@example.com"),
        }
    }

    #[test]
    fn test_filters_low_ratings_and_caps() {
        let entries = vec![
            feedback("a", 5),
            feedback("b", 2),
            feedback("c", 4),
            feedback("d", 3),
            feedback("e", 5),
            feedback("f", 4),
        ];
        let shown = select_for_display(&entries);
        let names: Vec<&str> = shown.iter().map(|f| f.customer_name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_display_invariants_hold_for_any_mix() {
        for len in 0..12u8 {
            let entries: Vec<Feedback> = (0..len).map(|i| feedback("x", i % 6)).collect();
            let shown = select_for_display(&entries);
            assert!(shown.len() <= MAX_DISPLAYED);
            assert!(shown.iter().all(|f| f.rating >= MIN_DISPLAY_RATING));
        }
    }

    #[test]
    fn test_empty_when_nothing_qualifies() {
        assert!(select_for_display(&[feedback("a", 1), feedback("b", 3)]).is_empty());
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let entries: Vec<Feedback> = serde_json::from_str(
            r#"[{"customer_name":"Ann","rating":5,"comment":"Great","email":null},
                {"customer_name":null,"rating":null,"comment":null,"email":"x@example.com"}]"#,
        )
        .unwrap();
        assert!(entries[0].email.is_empty());
        assert_eq!(entries[1].rating, 0);
        let shown = select_for_display(&entries);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].customer_name, "Ann");
    }
}
