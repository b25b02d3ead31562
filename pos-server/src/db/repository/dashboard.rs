//! Dashboard statistics
//!
//! Sales are taken from paid bills, keyed by `payment_time` (falling back to
//! `created_at` for bills settled without one).

use super::{RepoResult, dining_table, menu};
use crate::money;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use shared::models::{DashboardStats, SalesBucket};
use sqlx::SqlitePool;

const DAILY_BUCKETS: i64 = 7;

pub async fn stats(pool: &SqlitePool, now: DateTime<Utc>) -> RepoResult<DashboardStats> {
    let (total_sales, total_bills): (f64, i64) = sqlx::query_as(
        "SELECT COALESCE(SUM(total_amount), 0.0), COUNT(*) FROM bill WHERE payment_status = 'paid'",
    )
    .fetch_one(pool)
    .await?;

    let since = window_start(now).timestamp_millis();
    let sales: Vec<(i64, f64)> = sqlx::query_as(
        "SELECT COALESCE(payment_time, created_at), total_amount FROM bill \
         WHERE payment_status = 'paid' AND COALESCE(payment_time, created_at) >= ?",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(DashboardStats {
        total_sales: money::round_money(total_sales),
        total_bills,
        total_menus: menu::count(pool).await?,
        total_tables: dining_table::count(pool).await?,
        monthly_sales: monthly_buckets(&sales, now),
        daily_sales: daily_buckets(&sales, now),
    })
}

/// Earliest instant any bucket can cover
fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let year_start = Utc
        .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let first_day = first_daily_date(now)
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(now);
    year_start.min(first_day)
}

fn first_daily_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive() - Duration::days(DAILY_BUCKETS - 1)
}

fn to_date(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

fn finish(label: String, (total, bills): (Decimal, i64)) -> SalesBucket {
    SalesBucket {
        label,
        total: money::to_f64(total),
        bills,
    }
}

/// Twelve buckets for the calendar year of `now`
pub fn monthly_buckets(sales: &[(i64, f64)], now: DateTime<Utc>) -> Vec<SalesBucket> {
    let year = now.year();
    let mut sums = vec![(Decimal::ZERO, 0i64); 12];
    for (date, amount) in sales.iter().filter_map(|(t, a)| to_date(*t).map(|d| (d, *a))) {
        if date.year() == year {
            let slot = &mut sums[date.month0() as usize];
            slot.0 += money::to_decimal(amount);
            slot.1 += 1;
        }
    }
    sums.into_iter()
        .enumerate()
        .map(|(i, sum)| finish(format!("{year:04}-{:02}", i + 1), sum))
        .collect()
}

/// Seven daily buckets ending today, oldest first
pub fn daily_buckets(sales: &[(i64, f64)], now: DateTime<Utc>) -> Vec<SalesBucket> {
    let first = first_daily_date(now);
    let mut sums = vec![(Decimal::ZERO, 0i64); DAILY_BUCKETS as usize];
    for (date, amount) in sales.iter().filter_map(|(t, a)| to_date(*t).map(|d| (d, *a))) {
        let offset = (date - first).num_days();
        if (0..DAILY_BUCKETS).contains(&offset) {
            let slot = &mut sums[offset as usize];
            slot.0 += money::to_decimal(amount);
            slot.1 += 1;
        }
    }
    sums.into_iter()
        .enumerate()
        .map(|(i, sum)| {
            let day = first + Duration::days(i as i64);
            finish(day.format("%Y-%m-%d").to_string(), sum)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn ms(dt: DateTime<Utc>) -> i64 {
        dt.timestamp_millis()
    }

    #[test]
    fn test_monthly_buckets_current_year_only() {
        let now = at(2025, 6, 15, 12);
        let sales = [
            (ms(at(2025, 1, 3, 10)), 10.10),
            (ms(at(2025, 1, 20, 10)), 0.2),
            (ms(at(2025, 6, 15, 9)), 99.99),
            (ms(at(2024, 12, 31, 23)), 500.0),
        ];
        let buckets = monthly_buckets(&sales, now);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].label, "2025-01");
        assert_eq!(buckets[0].total, 10.3);
        assert_eq!(buckets[0].bills, 2);
        assert_eq!(buckets[5].total, 99.99);
        assert_eq!(buckets[11].label, "2025-12");
        assert_eq!(buckets[11].bills, 0);
    }

    #[test]
    fn test_daily_buckets_oldest_first() {
        let now = at(2025, 3, 2, 8);
        let sales = [
            (ms(at(2025, 2, 23, 12)), 7.0), // before the window
            (ms(at(2025, 2, 24, 12)) + 86_400_000, 5.0),
            (ms(at(2025, 3, 2, 1)), 3.5),
            (ms(at(2025, 3, 2, 7)), 1.5),
        ];
        let buckets = daily_buckets(&sales, now);
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].label, "2025-02-24");
        assert_eq!(buckets[0].total, 0.0);
        assert_eq!(buckets[1].label, "2025-02-25");
        assert_eq!(buckets[1].total, 5.0);
        assert_eq!(buckets[6].label, "2025-03-02");
        assert_eq!(buckets[6].total, 5.0);
        assert_eq!(buckets[6].bills, 2);
    }

    #[test]
    fn test_window_covers_early_january() {
        let now = at(2025, 1, 2, 0);
        assert_eq!(window_start(now), at(2024, 12, 27, 0));
        let now = at(2025, 8, 2, 0);
        assert_eq!(window_start(now), at(2025, 1, 1, 0));
    }

    #[tokio::test]
    async fn test_empty_database() {
        let pool = test_support::pool().await;
        let stats = stats(&pool, Utc::now()).await.unwrap();
        assert_eq!(stats.total_sales, 0.0);
        assert_eq!(stats.total_bills, 0);
        assert_eq!(stats.total_menus, 0);
        assert_eq!(stats.monthly_sales.len(), 12);
        assert_eq!(stats.daily_sales.len(), 7);
    }
}
