//! Calorie Accumulator
//!
//! Sums `calories[item] * quantity` over the submitted (item, quantity) pairs.
//! Unknown items count as 0 kcal. A quantity that is not a non-negative
//! integer skips its pair; the rest still accumulate.

use super::catalog::MealItems;

/// Total calories for parallel item/quantity lists.
///
/// Pairs are zipped, so surplus entries on the longer side are ignored.
pub fn calculate_total_calories<I, Q>(items: &[I], quantities: &[Q], catalog: &MealItems) -> u64
where
    I: AsRef<str>,
    Q: AsRef<str>,
{
    items
        .iter()
        .zip(quantities)
        .filter_map(|(item, qty)| {
            let qty = parse_quantity(qty.as_ref())?;
            let kcal = catalog.get(item.as_ref()).copied().unwrap_or(0) as u64;
            Some(kcal.saturating_mul(qty))
        })
        .fold(0u64, u64::saturating_add)
}

fn parse_quantity(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(qty) => Some(qty),
        Err(_) => {
            log::debug!("Skipping unparseable quantity {:?}", raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::meals::MealCatalog;

    fn breakfast() -> MealItems {
        MealCatalog::standard().items_for("Breakfast")
    }

    #[test]
    fn test_total_for_valid_pairs() {
        let total = calculate_total_calories(&["Oatmeal", "Boiled Eggs"], &["2", "1"], &breakfast());
        assert_eq!(total, 378);
    }

    #[test]
    fn test_malformed_quantity_is_skipped() {
        let total = calculate_total_calories(&["Oatmeal", "Boiled Eggs"], &["2", "xx"], &breakfast());
        assert_eq!(total, 300);
    }

    #[test]
    fn test_unknown_item_contributes_zero() {
        let total = calculate_total_calories(&["Oatmeal", "Pizza"], &["1", "5"], &breakfast());
        assert_eq!(total, 150);
    }

    #[test]
    fn test_negative_and_fractional_quantities_skipped() {
        let total = calculate_total_calories(&["Idli", "Dosa", "Poha"], &["-1", "1.5", "1"], &breakfast());
        assert_eq!(total, 200);
    }

    #[test]
    fn test_whitespace_around_quantity() {
        let total = calculate_total_calories(&["Idli"], &[" 3 "], &breakfast());
        assert_eq!(total, 210);
    }

    #[test]
    fn test_order_does_not_matter() {
        let catalog = breakfast();
        let a = calculate_total_calories(&["Upma", "Dosa"], &["2", "3"], &catalog);
        let b = calculate_total_calories(&["Dosa", "Upma"], &["3", "2"], &catalog);
        assert_eq!(a, b);
        assert_eq!(a, 720);
    }

    #[test]
    fn test_all_invalid_gives_zero() {
        let total = calculate_total_calories(&["Oatmeal"], &["abc"], &breakfast());
        assert_eq!(total, 0);
    }

    #[test]
    fn test_unequal_lengths_are_zipped() {
        let total = calculate_total_calories(&["Oatmeal", "Idli"], &["1"], &breakfast());
        assert_eq!(total, 150);

        let empty: [&str; 0] = [];
        assert_eq!(calculate_total_calories(&empty, &["1"], &breakfast()), 0);
    }

    #[test]
    fn test_unknown_category_catalog_gives_zero() {
        let catalog = MealCatalog::standard().items_for("Brunch");
        assert_eq!(calculate_total_calories(&["Oatmeal"], &["4"], &catalog), 0);
    }
}
