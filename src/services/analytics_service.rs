use std::collections::{BTreeMap, HashMap};

use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    dto::analytics::{MonthlyRevenue, SellerAnalytics},
    entity::orders::{Column as OrderCol, Entity as Orders},
    error::AppResult,
    models::{Order, OrderStatus},
    services::order_service::round_cents,
    state::AppState,
};

pub async fn seller_analytics(state: &AppState) -> AppResult<SellerAnalytics> {
    let orders = Orders::find()
        .order_by_asc(OrderCol::Date)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::try_from)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(summarize(&orders))
}

/// Cancelled orders bring in no revenue and are left out entirely.
pub fn summarize(orders: &[Order]) -> SellerAnalytics {
    let mut total_revenue = 0.0;
    let mut total_sales = 0_i64;
    let mut by_month: BTreeMap<String, f64> = BTreeMap::new();
    let mut units: HashMap<&str, i64> = HashMap::new();

    for order in orders.iter().filter(|o| o.status != OrderStatus::Cancelled) {
        total_revenue += order.total;
        total_sales += 1;
        let month = order.date.get(..7).unwrap_or(&order.date).to_string();
        *by_month.entry(month).or_default() += order.total;
        for item in &order.items {
            *units.entry(item.name.as_str()).or_default() += i64::from(item.quantity);
        }
    }

    // ties go to the alphabetically first name so the answer is stable
    let top_product = units
        .into_iter()
        .max_by(|(a_name, a_qty), (b_name, b_qty)| a_qty.cmp(b_qty).then(b_name.cmp(a_name)))
        .map(|(name, _)| name.to_string());

    SellerAnalytics {
        total_revenue: round_cents(total_revenue),
        total_sales,
        top_product,
        monthly_revenue: by_month
            .into_iter()
            .map(|(month, amount)| MonthlyRevenue {
                month,
                amount: round_cents(amount),
            })
            .collect(),
    }
}
