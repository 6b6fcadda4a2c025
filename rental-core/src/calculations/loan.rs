//! Monthly amortization schedule of a fixed-rate rental loan.
//!
//! The schedule supports a total deferral at the start of the loan: during
//! the deferral months nothing is repaid and the interest is added to the
//! balance. The level instalment is then computed on the capitalised balance
//! over the remaining months.
//!
//! | Phase        | Interest          | Principal            | Balance            |
//! |--------------|-------------------|----------------------|--------------------|
//! | deferral     | balance × tm      | 0                    | balance + interest |
//! | amortization | balance × tm      | payment − interest   | balance − principal|
//! | final month  | balance × tm      | remaining balance    | 0                  |
//!
//! Insurance is charged every month, including the deferral, either on the
//! borrowed amount or on the balance at the start of the month (see
//! [`InsuranceBasis`]).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use rental_core::LoanTerms;
//! use rental_core::calculations::build_loan_schedule;
//!
//! let terms = LoanTerms {
//!     duration_years: 20,
//!     annual_rate_pct: dec!(3.6),
//!     insurance_rate_pct: dec!(0.3),
//!     ..LoanTerms::default()
//! };
//!
//! let schedule = build_loan_schedule(dec!(150000), &terms).unwrap();
//!
//! assert_eq!(schedule.rows().len(), 240);
//! assert_eq!(schedule.rows().last().unwrap().remaining_balance, dec!(0));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{monthly_rate, round_half_up};
use crate::{InsuranceBasis, LoanTerms, MAX_LOAN_DURATION_YEARS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanScheduleError {
    /// The deferral leaves no month to repay the loan.
    #[error(
        "loan of {duration_years} years with {deferral_months} deferred months leaves \
         {amortization_months} months to repay"
    )]
    InvalidLoanTerm {
        duration_years: u32,
        deferral_months: u32,
        amortization_months: i64,
    },

    #[error("loan of {0} years exceeds the 40-year maximum")]
    DurationTooLong(u32),

    /// The annuity factor does not fit in a decimal.
    #[error("level payment over {months} months at {annual_rate_pct} % overflows")]
    PaymentOverflow { months: u64, annual_rate_pct: Decimal },
}

/// One month of the schedule, in full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanScheduleRow {
    pub month: u32,
    pub year: u32,
    pub interest: Decimal,
    pub principal: Decimal,
    pub insurance: Decimal,

    /// Instalment paid to the lender, insurance excluded. Zero during the
    /// deferral, when the interest is capitalised instead.
    pub payment: Decimal,
    pub remaining_balance: Decimal,
}

/// Yearly aggregate of the schedule, rounded to cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanYearSummary {
    pub year: u32,
    pub interest: Decimal,
    pub principal: Decimal,
    pub insurance: Decimal,

    /// Instalments plus insurance actually paid during the year.
    pub debt_service: Decimal,
    pub closing_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanSchedule {
    principal: Decimal,
    monthly_payment: Decimal,
    balance_after_deferral: Decimal,
    rows: Vec<LoanScheduleRow>,
}

impl LoanSchedule {
    /// Builds the full `duration_years × 12` month schedule.
    ///
    /// # Errors
    ///
    /// Returns [`LoanScheduleError::InvalidLoanTerm`] when the deferral is at
    /// least as long as the loan, [`LoanScheduleError::DurationTooLong`] past
    /// [`MAX_LOAN_DURATION_YEARS`] and [`LoanScheduleError::PaymentOverflow`]
    /// when the instalment cannot be represented.
    pub fn build(
        principal: Decimal,
        terms: &LoanTerms,
    ) -> Result<Self, LoanScheduleError> {
        if terms.duration_years > MAX_LOAN_DURATION_YEARS {
            return Err(LoanScheduleError::DurationTooLong(terms.duration_years));
        }
        let amortization_months = terms.amortization_months();
        if amortization_months <= 0 {
            return Err(LoanScheduleError::InvalidLoanTerm {
                duration_years: terms.duration_years,
                deferral_months: terms.deferral_months,
                amortization_months,
            });
        }

        let tm = monthly_rate(terms.annual_rate_pct);
        let ta = monthly_rate(terms.insurance_rate_pct);
        let total_months = terms.total_months();

        let mut rows = Vec::with_capacity(total_months as usize);
        let mut balance = principal;
        let mut level_payment: Option<Decimal> = None;
        let mut balance_after_deferral = principal;

        for month in 1..=total_months {
            let insurance = match terms.insurance_basis {
                InsuranceBasis::InitialPrincipal => principal * ta,
                InsuranceBasis::OutstandingBalance => balance * ta,
            };
            let interest = balance * tm;

            let (principal_repaid, payment) = if month <= terms.deferral_months {
                balance += interest;
                balance_after_deferral = balance;
                (Decimal::ZERO, Decimal::ZERO)
            } else {
                let payment = match level_payment {
                    Some(payment) => payment,
                    None => {
                        let months = amortization_months as u64;
                        let payment = Self::level_payment(balance, tm, months).ok_or(
                            LoanScheduleError::PaymentOverflow {
                                months,
                                annual_rate_pct: terms.annual_rate_pct,
                            },
                        )?;
                        *level_payment.insert(payment)
                    }
                };

                let mut repaid = payment - interest;
                if month == total_months || repaid > balance {
                    repaid = balance;
                }
                balance -= repaid;
                (repaid, interest + repaid)
            };

            rows.push(LoanScheduleRow {
                month,
                year: (month - 1) / 12 + 1,
                interest,
                principal: principal_repaid,
                insurance,
                payment,
                remaining_balance: balance,
            });
        }

        Ok(Self {
            principal,
            monthly_payment: level_payment.unwrap_or_default(),
            balance_after_deferral,
            rows,
        })
    }

    /// Constant instalment repaying `balance` over `months` at rate `tm`,
    /// `None` when an intermediate product overflows.
    fn level_payment(
        balance: Decimal,
        tm: Decimal,
        months: u64,
    ) -> Option<Decimal> {
        if tm.is_zero() {
            return balance.checked_div(Decimal::from(months));
        }
        let factor = (Decimal::ONE + tm).checked_powu(months)?;
        balance
            .checked_mul(tm)?
            .checked_mul(factor)?
            .checked_div(factor - Decimal::ONE)
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn rows(&self) -> &[LoanScheduleRow] {
        &self.rows
    }

    /// Level instalment after the deferral, insurance excluded.
    pub fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }

    /// Capitalised balance at the end of the deferral (the borrowed amount
    /// when there is none).
    pub fn balance_after_deferral(&self) -> Decimal {
        self.balance_after_deferral
    }

    /// Aggregates the twelve months of `year`. Years past the end of the
    /// loan are all zero.
    pub fn year_summary(
        &self,
        year: u32,
    ) -> LoanYearSummary {
        let months: Vec<&LoanScheduleRow> =
            self.rows.iter().filter(|row| row.year == year).collect();
        let Some(last) = months.last() else {
            return LoanYearSummary {
                year,
                ..LoanYearSummary::default()
            };
        };

        let sum = |field: fn(&LoanScheduleRow) -> Decimal| -> Decimal {
            months.iter().map(|row| field(row)).sum()
        };
        let insurance = sum(|row| row.insurance);

        LoanYearSummary {
            year,
            interest: round_half_up(sum(|row| row.interest)),
            principal: round_half_up(sum(|row| row.principal)),
            insurance: round_half_up(insurance),
            debt_service: round_half_up(sum(|row| row.payment) + insurance),
            closing_balance: round_half_up(last.remaining_balance),
        }
    }

    /// One summary per year of the loan.
    pub fn yearly(&self) -> Vec<LoanYearSummary> {
        let years = self.rows.last().map_or(0, |row| row.year);
        (1..=years).map(|year| self.year_summary(year)).collect()
    }

    pub fn total_interest(&self) -> Decimal {
        round_half_up(self.rows.iter().map(|row| row.interest).sum())
    }

    pub fn total_insurance(&self) -> Decimal {
        round_half_up(self.rows.iter().map(|row| row.insurance).sum())
    }

    /// Interest plus insurance over the life of the loan.
    pub fn total_cost(&self) -> Decimal {
        self.total_interest() + self.total_insurance()
    }
}

/// Builds the amortization schedule of `principal` under `terms`.
pub fn build_loan_schedule(
    principal: Decimal,
    terms: &LoanTerms,
) -> Result<LoanSchedule, LoanScheduleError> {
    LoanSchedule::build(principal, terms)
}
