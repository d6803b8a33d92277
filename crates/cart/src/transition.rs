//! Pure cart state transitions.
//!
//! Nothing here touches storage, the network, or the notifier; the
//! [`crate::store::CartStore`] shell owns those side effects. Each
//! transition returns the full replacement item list, so the caller
//! installs and persists exactly one value.

use tucano_core::ProductId;

use crate::models::{CartItem, Product, Stock};

/// Why a transition refused to produce a new cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The requested quantity exceeds the available stock.
    OutOfStock,
    /// No line item with the given product id exists.
    NotInCart,
}

/// Raise an existing line item's amount by one, gated by `stock`.
///
/// # Errors
///
/// `NotInCart` if the id has no line item; `OutOfStock` if one more unit
/// would exceed the available stock.
pub fn increment(
    items: &[CartItem],
    id: ProductId,
    stock: Stock,
) -> Result<Vec<CartItem>, Rejection> {
    let current = items
        .iter()
        .find(|item| item.id() == id)
        .ok_or(Rejection::NotInCart)?;

    // amount + 1 > stock, written overflow-free
    if current.amount >= stock.amount {
        return Err(Rejection::OutOfStock);
    }

    Ok(items
        .iter()
        .cloned()
        .map(|mut item| {
            if item.id() == id {
                item.amount += 1;
            }
            item
        })
        .collect())
}

/// Append a product not yet in the cart as a new line item with amount 1.
#[must_use]
pub fn append(items: &[CartItem], product: Product) -> Vec<CartItem> {
    let mut next = items.to_vec();
    next.push(CartItem { product, amount: 1 });
    next
}

/// Drop the line item with the given id, preserving the order of the rest.
///
/// # Errors
///
/// `NotInCart` if the id has no line item.
pub fn remove(items: &[CartItem], id: ProductId) -> Result<Vec<CartItem>, Rejection> {
    if !items.iter().any(|item| item.id() == id) {
        return Err(Rejection::NotInCart);
    }

    Ok(items
        .iter()
        .filter(|item| item.id() != id)
        .cloned()
        .collect())
}

/// Replace a line item's amount with `amount`, gated by `stock`.
///
/// The stock gate runs before the membership check, so an unknown id with
/// insufficient stock reports `OutOfStock`, not `NotInCart`.
///
/// # Errors
///
/// `OutOfStock` if `amount` exceeds the available stock; `NotInCart` if
/// the id has no line item.
pub fn set_amount(
    items: &[CartItem],
    id: ProductId,
    amount: u32,
    stock: Stock,
) -> Result<Vec<CartItem>, Rejection> {
    if amount > stock.amount {
        return Err(Rejection::OutOfStock);
    }

    if !items.iter().any(|item| item.id() == id) {
        return Err(Rejection::NotInCart);
    }

    Ok(items
        .iter()
        .cloned()
        .map(|mut item| {
            if item.id() == id {
                item.amount = amount;
            }
            item
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tucano_core::{CurrencyCode, Price};

    use super::*;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Price::from_cents(19990, CurrencyCode::BRL),
            image: format!("https://cdn.tucanoshoes.com.br/p/{id}.jpg"),
        }
    }

    fn item(id: i32, amount: u32) -> CartItem {
        CartItem {
            product: product(id),
            amount,
        }
    }

    fn stock(id: i32, amount: u32) -> Stock {
        Stock {
            id: ProductId::new(id),
            amount,
        }
    }

    #[test]
    fn test_increment_within_stock() {
        let items = vec![item(1, 2), item(2, 1)];
        let next = increment(&items, ProductId::new(1), stock(1, 3)).unwrap();
        assert_eq!(next[0].amount, 3);
        assert_eq!(next[1].amount, 1);
    }

    #[test]
    fn test_increment_at_stock_boundary_rejected() {
        // amount 2, stock 2: one more unit is unavailable
        let items = vec![item(1, 2)];
        let result = increment(&items, ProductId::new(1), stock(1, 2));
        assert_eq!(result.unwrap_err(), Rejection::OutOfStock);
    }

    #[test]
    fn test_increment_unknown_id() {
        let items = vec![item(1, 1)];
        let result = increment(&items, ProductId::new(9), stock(9, 5));
        assert_eq!(result.unwrap_err(), Rejection::NotInCart);
    }

    #[test]
    fn test_append_pushes_to_end_with_amount_one() {
        let items = vec![item(1, 2)];
        let next = append(&items, product(2));
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].id(), ProductId::new(2));
        assert_eq!(next[1].amount, 1);
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let items = vec![item(1, 1), item(2, 2), item(3, 3)];
        let next = remove(&items, ProductId::new(2)).unwrap();
        let ids: Vec<i32> = next.iter().map(|i| i.id().as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(next[1].amount, 3);
    }

    #[test]
    fn test_remove_unknown_id() {
        let items = vec![item(1, 1)];
        assert_eq!(
            remove(&items, ProductId::new(2)).unwrap_err(),
            Rejection::NotInCart
        );
    }

    #[test]
    fn test_set_amount_replaces_quantity() {
        let items = vec![item(1, 1)];
        let next = set_amount(&items, ProductId::new(1), 4, stock(1, 5)).unwrap();
        assert_eq!(next[0].amount, 4);
    }

    #[test]
    fn test_set_amount_over_stock_rejected() {
        let items = vec![item(1, 1)];
        let result = set_amount(&items, ProductId::new(1), 6, stock(1, 5));
        assert_eq!(result.unwrap_err(), Rejection::OutOfStock);
    }

    #[test]
    fn test_set_amount_checks_stock_before_membership() {
        // Unknown id with insufficient stock reports OutOfStock
        let items = vec![item(1, 1)];
        let result = set_amount(&items, ProductId::new(9), 6, stock(9, 5));
        assert_eq!(result.unwrap_err(), Rejection::OutOfStock);
    }

    #[test]
    fn test_set_amount_unknown_id_within_stock() {
        let items = vec![item(1, 1)];
        let result = set_amount(&items, ProductId::new(9), 2, stock(9, 5));
        assert_eq!(result.unwrap_err(), Rejection::NotInCart);
    }
}
