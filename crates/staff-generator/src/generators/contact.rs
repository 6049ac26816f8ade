//! Names, email addresses and postal addresses.

use rand::Rng;
use staff_core::names::{FIRST_NAMES, LAST_NAMES};
use staff_core::{Address, State};

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Sample a (first, last) name pair.
pub fn sample_name<R: Rng>(rng: &mut R) -> (String, String) {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    (first.to_string(), last.to_string())
}

/// Derive a contact address from a name: `first.last@domain`, lowercased,
/// keeping only ASCII alphanumerics from each name part.
pub fn email_for(first_name: &str, last_name: &str, domain: &str) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };
    format!("{}.{}@{}", clean(first_name), clean(last_name), domain)
}

/// Sample an address from the fixed geography table.
pub fn sample_address<R: Rng>(rng: &mut R) -> Address {
    let state = State::ALL[rng.gen_range(0..State::ALL.len())];
    let city = pick(rng, state.cities());
    let (zip_low, zip_high) = state.zip_range();
    let zip = rng.gen_range(zip_low..=zip_high);

    Address {
        city: city.to_string(),
        state,
        zip: format!("{zip:05}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_email_derived_from_name() {
        assert_eq!(
            email_for("Mary-Anne", "O'Brien", "example.com"),
            "maryanne.obrien@example.com"
        );
    }

    #[test]
    fn test_address_consistent_with_state() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let address = sample_address(&mut rng);
            assert!(address.state.cities().contains(&address.city.as_str()));
            assert_eq!(address.zip.len(), 5);
            let zip: u32 = address.zip.parse().unwrap();
            let (low, high) = address.state.zip_range();
            assert!((low..=high).contains(&zip));
        }
    }

    #[test]
    fn test_names_come_from_pools() {
        let mut rng = StdRng::seed_from_u64(3);
        let (first, last) = sample_name(&mut rng);
        assert!(FIRST_NAMES.contains(&first.as_str()));
        assert!(LAST_NAMES.contains(&last.as_str()));
    }
}
