use serde::Serialize;

use super::icons::{Icon, UnknownIcon};

pub type ServiceId = i32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    pub description: String,
    pub price_from: i32,
    pub icon: Icon,
    pub display_order: i32,
}

impl Service {
    pub fn price_label(&self) -> String {
        format_price_from(self.price_from)
    }
}

impl TryFrom<crate::db::portfolio::Service> for Service {
    type Error = UnknownIcon;

    fn try_from(row: crate::db::portfolio::Service) -> Result<Self, Self::Error> {
        Ok(Service {
            id: row.id,
            title: row.title,
            description: row.description,
            price_from: row.price_from,
            icon: row.icon_name.parse()?,
            display_order: row.display_order,
        })
    }
}

impl From<Service> for lens_artistry_api_structs::Service {
    fn from(service: Service) -> Self {
        lens_artistry_api_structs::Service {
            id: service.id,
            title: service.title,
            description: service.description,
            price_from: service.price_from,
            icon_name: service.icon.name().to_string(),
            display_order: service.display_order,
        }
    }
}

/// Renders a starting price in roubles, grouping thousands: `от 50 000 ₽`.
pub fn format_price_from(price: i32) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if price < 0 { "-" } else { "" };
    format!("от {}{} ₽", sign, grouped)
}
