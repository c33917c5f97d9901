//! Identifier generation.

use rand::Rng;
use rand::distributions::Alphanumeric;
use uuid::Uuid;

/// Length of a generated `school_id`.
pub const SHORT_CODE_LEN: usize = 8;

/// Draws an 8-character code uniformly from `[A-Za-z0-9]`.
///
/// Codes are not checked for uniqueness; see [`crate::generators::AccountGenerator::generate_batch`]
/// for the in-batch guarantee.
pub fn generate_short_code(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(SHORT_CODE_LEN)
        .map(char::from)
        .collect()
}

/// Random (v4) identifier in the 36-character hyphenated form.
pub fn generate_unique_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_short_code_alphabet_and_length() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let code = generate_short_code(&mut rng);
            assert_eq!(code.len(), SHORT_CODE_LEN);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_short_code_covers_all_classes() {
        let mut rng = StdRng::seed_from_u64(7);
        let joined: String = (0..200).map(|_| generate_short_code(&mut rng)).collect();

        assert!(joined.chars().any(|c| c.is_ascii_uppercase()));
        assert!(joined.chars().any(|c| c.is_ascii_lowercase()));
        assert!(joined.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_short_code_is_reproducible_with_seed() {
        let a = generate_short_code(&mut StdRng::seed_from_u64(42));
        let b = generate_short_code(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unique_id_layout() {
        let id = generate_unique_id();
        assert_eq!(id.len(), 36);

        let groups: Vec<&str> = id.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(lengths, vec![8, 4, 4, 4, 12]);
        assert!(
            groups
                .iter()
                .all(|g| g.chars().all(|c| c.is_ascii_hexdigit()))
        );

        // Version nibble
        assert_eq!(&groups[2][..1], "4");
        assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_unique_ids_differ() {
        assert_ne!(generate_unique_id(), generate_unique_id());
    }
}
