use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A ticket type as the storefront displays it.
///
/// The remote API owns the inventory; within one dialog this projection is
/// read-only and only changes by fetching it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub available_quantity: u32,
}

impl TicketType {
    pub fn is_sold_out(&self) -> bool {
        self.available_quantity == 0
    }
}

/// Ticket types a buyer can actually pick, in offered order.
pub fn selectable(ticket_types: &[TicketType]) -> impl Iterator<Item = &TicketType> {
    ticket_types.iter().filter(|ticket_type| !ticket_type.is_sold_out())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_type(name: &str, available_quantity: u32) -> TicketType {
        TicketType {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price: Decimal::new(2500, 2),
            available_quantity,
        }
    }

    #[test]
    fn test_sold_out_only_when_nothing_left() {
        assert!(ticket_type("General", 0).is_sold_out());
        assert!(!ticket_type("General", 1).is_sold_out());
    }

    #[test]
    fn test_selectable_skips_sold_out_types() {
        let offered = vec![
            ticket_type("Early Bird", 0),
            ticket_type("General", 120),
            ticket_type("VIP", 4),
        ];

        let names: Vec<&str> = selectable(&offered).map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["General", "VIP"]);
    }

    #[test]
    fn test_deserializes_remote_payload() {
        let json = r#"{
            "id": "6f1c7a8e-1f7b-4a53-9d6e-0f5b8f0c2d11",
            "name": "VIP",
            "price": 100,
            "available_quantity": 40
        }"#;

        let parsed: TicketType = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, "VIP");
        assert_eq!(parsed.price, Decimal::from(100));
        assert_eq!(parsed.available_quantity, 40);
    }
}
