//! End-of-month balance projection
//!
//! Extrapolates the month's average daily spending over the days left in the
//! month, optionally accounting for recurring bills and income still due.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::display::CurrencyFormat;
use crate::error::FinanceResult;
use crate::models::{Money, RecurringEvent, RecurringKind};
use crate::recurrence::{days_in_month, month_end, upcoming_occurrences};

/// What the projection starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionInput {
    pub current_balance: Money,
    /// Total spent so far this month
    pub month_expenses: Money,
    /// Current UTC day
    pub today: NaiveDate,
}

/// Projected balance at the end of the current month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthProjection {
    pub today: NaiveDate,
    pub current_balance: Money,
    pub days_in_month: u32,
    /// Days elapsed, floored at 1
    pub days_passed: u32,
    pub days_remaining: u32,
    /// Average spending per elapsed day, rounded half-up
    pub daily_burn: Money,
    pub projected_balance: Money,
    pub overdraft_risk: bool,
    /// Subscriptions still due after today
    pub upcoming_bills: Money,
    /// Recurring income still expected after today
    pub upcoming_income: Money,
}

impl MonthProjection {
    pub fn project(input: ProjectionInput) -> FinanceResult<Self> {
        let current_balance = input.current_balance.ensure_safe()?;
        let month_expenses = input.month_expenses.ensure_safe()?;

        let day = input.today.day();
        let days_in_month = days_in_month(input.today);
        let days_passed = day.max(1);
        let days_remaining = days_in_month - day;

        let daily_burn = month_expenses.mul_div_half_up(1, i64::from(days_passed))?;
        let projected_balance =
            current_balance.checked_sub(daily_burn.checked_mul(i64::from(days_remaining))?)?;

        tracing::debug!(
            today = %input.today,
            daily_burn = daily_burn.cents(),
            projected = projected_balance.cents(),
            "projected month end balance"
        );

        Ok(Self {
            today: input.today,
            current_balance,
            days_in_month,
            days_passed,
            days_remaining,
            daily_burn,
            projected_balance,
            overdraft_risk: projected_balance.is_negative(),
            upcoming_bills: Money::zero(),
            upcoming_income: Money::zero(),
        })
    }

    /// Adjust for recurring events falling between tomorrow and month end
    ///
    /// Each subscription occurrence in that window is subtracted and each
    /// income occurrence added. Inactive events are ignored.
    pub fn with_upcoming_bills(mut self, events: &[RecurringEvent]) -> FinanceResult<Self> {
        let Some(tomorrow) = self.today.checked_add_days(Days::new(1)) else {
            return Ok(self);
        };
        let last_day = month_end(self.today);

        for event in events.iter().filter(|e| e.active) {
            let count =
                upcoming_occurrences(event.next_date, event.frequency, tomorrow, last_day)?.len();
            if count == 0 {
                continue;
            }
            let due = event.amount.ensure_safe()?.checked_mul(count as i64)?;
            match event.kind {
                RecurringKind::Subscription => {
                    self.upcoming_bills = self.upcoming_bills.checked_add(due)?
                }
                RecurringKind::Income => {
                    self.upcoming_income = self.upcoming_income.checked_add(due)?
                }
            }
        }

        self.projected_balance = self
            .projected_balance
            .checked_sub(self.upcoming_bills)?
            .checked_add(self.upcoming_income)?;
        self.overdraft_risk = self.projected_balance.is_negative();

        Ok(self)
    }

    pub fn format_terminal(&self, format: &CurrencyFormat) -> FinanceResult<String> {
        let mut output = String::new();

        output.push_str(&format!("Month-End Projection ({})\n", self.today));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            "Current Balance",
            format.format(self.current_balance)?
        ));
        output.push_str(&format!("{:<20} {:>19}\n", "Daily Burn", format.format(self.daily_burn)?));
        output.push_str(&format!("{:<20} {:>19}\n", "Days Remaining", self.days_remaining));
        if !self.upcoming_bills.is_zero() {
            output.push_str(&format!(
                "{:<20} {:>19}\n",
                "Upcoming Bills",
                format.format(self.upcoming_bills)?
            ));
        }
        if !self.upcoming_income.is_zero() {
            output.push_str(&format!(
                "{:<20} {:>19}\n",
                "Upcoming Income",
                format.format(self.upcoming_income)?
            ));
        }
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            "Projected Balance",
            format.format(self.projected_balance)?
        ));
        if self.overdraft_risk {
            output.push_str("WARNING: projected overdraft before month end\n");
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecurrenceFrequency;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(balance: i64, expenses: i64, today: NaiveDate) -> ProjectionInput {
        ProjectionInput {
            current_balance: Money::from_cents(balance),
            month_expenses: Money::from_cents(expenses),
            today,
        }
    }

    #[test]
    fn test_project() {
        let p = MonthProjection::project(input(1_000_000, 300_000, ymd(2026, 2, 10))).unwrap();

        assert_eq!(p.days_in_month, 28);
        assert_eq!(p.days_passed, 10);
        assert_eq!(p.days_remaining, 18);
        assert_eq!(p.daily_burn.cents(), 30_000);
        assert_eq!(p.projected_balance.cents(), 460_000);
        assert!(!p.overdraft_risk);
    }

    #[test]
    fn test_daily_burn_rounds_half_up() {
        // 1000 / 16 = 62.5
        let p = MonthProjection::project(input(0, 1000, ymd(2026, 3, 16))).unwrap();
        assert_eq!(p.daily_burn.cents(), 63);
        assert_eq!(p.days_remaining, 15);
        assert_eq!(p.projected_balance.cents(), -945);
        assert!(p.overdraft_risk);
    }

    #[test]
    fn test_first_and_last_day() {
        let first = MonthProjection::project(input(50_000, 10_000, ymd(2024, 2, 1))).unwrap();
        assert_eq!(first.days_passed, 1);
        assert_eq!(first.days_remaining, 28);
        assert_eq!(first.projected_balance.cents(), 50_000 - 10_000 * 28);

        let last = MonthProjection::project(input(50_000, 10_000, ymd(2026, 1, 31))).unwrap();
        assert_eq!(last.days_remaining, 0);
        assert_eq!(last.projected_balance.cents(), 50_000);
    }

    #[test]
    fn test_with_upcoming_bills() {
        let events = vec![
            RecurringEvent::subscription(
                "Netflix",
                Money::from_cents(29_900),
                RecurrenceFrequency::Monthly,
                ymd(2025, 11, 20),
            ),
            RecurringEvent::subscription(
                "Gym",
                Money::from_cents(10_000),
                RecurrenceFrequency::Weekly,
                ymd(2026, 2, 3),
            ),
            RecurringEvent::income(
                "Salario",
                Money::from_cents(1_500_000),
                RecurrenceFrequency::Biweekly,
                ymd(2026, 1, 30),
            ),
            // already charged today
            RecurringEvent::subscription(
                "Spotify",
                Money::from_cents(12_900),
                RecurrenceFrequency::Monthly,
                ymd(2026, 2, 10),
            ),
            RecurringEvent {
                active: false,
                ..RecurringEvent::subscription(
                    "Old",
                    Money::from_cents(99_900),
                    RecurrenceFrequency::Monthly,
                    ymd(2026, 2, 15),
                )
            },
        ];

        let p = MonthProjection::project(input(1_000_000, 300_000, ymd(2026, 2, 10)))
            .unwrap()
            .with_upcoming_bills(&events)
            .unwrap();

        // Netflix on the 20th, gym on the 17th and 24th
        assert_eq!(p.upcoming_bills.cents(), 29_900 + 2 * 10_000);
        // Salary on the 13th and 27th
        assert_eq!(p.upcoming_income.cents(), 3_000_000);
        assert_eq!(p.projected_balance.cents(), 460_000 - 49_900 + 3_000_000);
    }

    #[test]
    fn test_bills_can_cause_overdraft() {
        let events = vec![RecurringEvent::subscription(
            "Renta",
            Money::from_cents(800_000),
            RecurrenceFrequency::Monthly,
            ymd(2026, 1, 28),
        )];
        let p = MonthProjection::project(input(900_000, 100_000, ymd(2026, 2, 20)))
            .unwrap()
            .with_upcoming_bills(&events)
            .unwrap();

        assert_eq!(p.daily_burn.cents(), 5000);
        assert_eq!(p.projected_balance.cents(), 900_000 - 5000 * 8 - 800_000);
        assert!(!p.overdraft_risk);

        let tighter = MonthProjection::project(input(820_000, 100_000, ymd(2026, 2, 20)))
            .unwrap()
            .with_upcoming_bills(&events)
            .unwrap();
        assert!(tighter.overdraft_risk);
    }

    #[test]
    fn test_format_terminal() {
        let output = MonthProjection::project(input(0, 1000, ymd(2026, 3, 16)))
            .unwrap()
            .format_terminal(&CurrencyFormat::mxn())
            .unwrap();
        assert!(output.contains("-$9.45"));
        assert!(output.contains("WARNING"));
    }
}
