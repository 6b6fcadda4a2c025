//! Ten-year fiscal and cashflow projection of a rental property.
//!
//! A single [`FiscalEngine`] serves every [`Regime`]: the regime only
//! selects a [`RegimeProfile`] that switches depreciation, insurance
//! deduction, the deductible charge set, the tax formula and the treatment
//! of losses.
//!
//! # Yearly steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross rent: monthly rent × (12 − vacancy), indexed |
//! | 2    | Deductible charges: the regime's charge set, minus the recoverable share of co-ownership fees |
//! | 3    | Interest (and insurance for companies) from the loan schedule, depreciation if allowed |
//! | 4    | Pre-carryforward result: rent − charges − interest − insurance − depreciation |
//! | 5    | Loss: recorded in the ledger. Profit: reduced by past losses, oldest first |
//! | 6    | Tax: progressive personal, micro abated or two-tier corporate, never negative |
//! | 7    | Cashflow: rent − charges + recoverable − tax − debt service |
//!
//! Micro regimes skip steps 2 to 5: the taxable base is gross rent minus a
//! flat abatement.
//!
//! A deficit offset against the household's other income leaves the
//! property's tax at zero. The income tax it saves elsewhere is reported in
//! [`AnnualResult::global_income_tax_saving`] and stays out of the property
//! cashflow.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use rental_core::{
//!     AcquisitionCost, LoanTerms, Regime, RentalRevenue, SimulationInput, TaxSettings,
//! };
//! use rental_core::calculations::simulate;
//!
//! let input = SimulationInput {
//!     acquisition: AcquisitionCost {
//!         price: dec!(120000),
//!         down_payment: dec!(129600),
//!         ..AcquisitionCost::default()
//!     },
//!     loan: LoanTerms { duration_years: 15, ..LoanTerms::default() },
//!     revenue: RentalRevenue {
//!         monthly_rent: dec!(850),
//!         vacancy_months: dec!(1),
//!         ..RentalRevenue::default()
//!     },
//!     ..SimulationInput::default()
//! };
//!
//! let report = simulate(&input, Regime::MicroBic, &TaxSettings::default()).unwrap();
//!
//! // 9,350 × 50 % × (30 % + 17.2 %)
//! assert_eq!(report.years[0].tax, dec!(2206.60));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculations::carryforward::{CarryforwardError, LossCarryforward};
use crate::calculations::common::{growth_factor, max, round_half_up};
use crate::calculations::depreciation::{DepreciationError, DepreciationPlan};
use crate::calculations::income_tax::{IncomeTaxError, MarginalRateResolver, corporate_tax};
use crate::calculations::loan::{LoanSchedule, LoanScheduleError};
use crate::{
    AnnualResult, ChargeKind, InputValidationError, LossTreatment, Regime, RegimeProfile,
    SettingsError, SimulationInput, SimulationReport, SimulationWarning, TaxFormula, TaxSettings,
};

/// Number of projected years.
pub const HORIZON_YEARS: u32 = 10;

/// Errors that stop a simulation before its first year.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid simulation input: {0}")]
    InvalidInput(#[from] InputValidationError),

    #[error("invalid tax settings: {0}")]
    InvalidSettings(#[from] SettingsError),

    #[error(transparent)]
    Loan(#[from] LoanScheduleError),

    #[error(transparent)]
    Depreciation(#[from] DepreciationError),

    #[error(transparent)]
    Carryforward(#[from] CarryforwardError),

    #[error(transparent)]
    IncomeTax(#[from] IncomeTaxError),
}

/// Runs projections of one regime under one set of tax settings.
#[derive(Debug, Clone)]
pub struct FiscalEngine<'a> {
    settings: &'a TaxSettings,
    profile: RegimeProfile,
}

impl<'a> FiscalEngine<'a> {
    pub fn new(
        settings: &'a TaxSettings,
        regime: Regime,
    ) -> Self {
        Self {
            settings,
            profile: RegimeProfile::for_regime(regime, settings),
        }
    }

    pub fn profile(&self) -> &RegimeProfile {
        &self.profile
    }

    /// Projects `input` over [`HORIZON_YEARS`] years.
    ///
    /// Settings, input ranges, the loan term, depreciation durations (for
    /// regimes that depreciate) and the marginal-rate configuration are all
    /// checked before the first year is computed, so a simulation either
    /// fails up front or returns every year.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] for any configuration error.
    pub fn simulate(
        &self,
        input: &SimulationInput,
    ) -> Result<SimulationReport, SimulationError> {
        self.settings.validate()?;
        input.validate()?;

        let loan_principal = input.acquisition.loan_principal();
        let schedule = LoanSchedule::build(loan_principal, &input.loan)?;
        let depreciation = if self.profile.allows_depreciation {
            Some(DepreciationPlan::build(
                &input.acquisition,
                &input.depreciation,
            )?)
        } else {
            None
        };
        let marginal_rate = MarginalRateResolver::new(
            &self.settings.income_brackets,
            &input.household.marginal_rate,
        )?;

        info!(
            regime = self.profile.regime.as_str(),
            loan_principal = %loan_principal,
            monthly_payment = %schedule.monthly_payment(),
            "Starting simulation"
        );

        let mut projection = Projection {
            engine: self,
            input,
            schedule: &schedule,
            depreciation: depreciation.as_ref(),
            marginal_rate,
            ledger: LossCarryforward::new(),
            warnings: Vec::new(),
        };

        let years = (1..=HORIZON_YEARS)
            .map(|year| projection.year(year))
            .collect::<Result<Vec<_>, _>>()?;

        let report = SimulationReport {
            regime: self.profile.regime,
            loan_principal,
            monthly_payment: schedule.monthly_payment(),
            years,
            warnings: projection.warnings,
        };

        info!(
            regime = self.profile.regime.as_str(),
            total_tax = %report.total_tax(),
            total_cashflow = %report.total_cashflow(),
            "Simulation complete"
        );

        Ok(report)
    }
}

/// Projects `input` under `regime`.
pub fn simulate(
    input: &SimulationInput,
    regime: Regime,
    settings: &TaxSettings,
) -> Result<SimulationReport, SimulationError> {
    FiscalEngine::new(settings, regime).simulate(input)
}

/// Mutable state of one simulation run.
struct Projection<'e, 'a> {
    engine: &'e FiscalEngine<'a>,
    input: &'e SimulationInput,
    schedule: &'e LoanSchedule,
    depreciation: Option<&'e DepreciationPlan>,
    marginal_rate: MarginalRateResolver<'a>,
    ledger: LossCarryforward,
    warnings: Vec<SimulationWarning>,
}

impl Projection<'_, '_> {
    fn year(
        &mut self,
        year: u32,
    ) -> Result<AnnualResult, SimulationError> {
        let engine = self.engine;
        let input = self.input;
        let profile = &engine.profile;
        let settings = engine.settings;
        let revenue = &input.revenue;
        let charges = &input.charges;

        let rent_growth = growth_factor(revenue.rent_indexation_pct, year);
        let charge_growth = growth_factor(revenue.charges_indexation_pct, year);

        let gross_rent = revenue.base_gross_rent() * rent_growth;
        let cash_charges = charges.total() * charge_growth;
        let recoverable_charges = charges.co_ownership * charge_growth * settings.recoverable_share;
        let deductible_charges = self.deductible_charges(charge_growth, recoverable_charges);

        let loan = self.schedule.year_summary(year);
        let deducted_insurance = if profile.deducts_loan_insurance {
            loan.insurance
        } else {
            Decimal::ZERO
        };
        let depreciation = self
            .depreciation
            .map_or(Decimal::ZERO, |plan| plan.total_for_year(year));

        let (pre_carryforward_result, taxable_result, carryforward_consumed) =
            match profile.tax_formula {
                TaxFormula::MicroAbated { abatement, ceiling } => {
                    self.check_micro_ceiling(year, gross_rent, ceiling);
                    let base = gross_rent * (Decimal::ONE - abatement);
                    (base, base, Decimal::ZERO)
                }
                TaxFormula::ProgressivePersonal | TaxFormula::CorporateTwoTier => {
                    let result = gross_rent
                        - deductible_charges
                        - loan.interest
                        - deducted_insurance
                        - depreciation;
                    let deficit_cap = self.deficit_cap();
                    let outcome = apply_carryforward(
                        &mut self.ledger,
                        profile.loss_treatment,
                        deficit_cap,
                        year,
                        result,
                    )?;
                    (result, outcome.taxable_result, outcome.consumed)
                }
            };

        let tax = self.tax(taxable_result);
        let global_income_tax_saving = self.global_income_tax_saving(taxable_result);
        let annual_cashflow =
            gross_rent - cash_charges + recoverable_charges - tax - loan.debt_service;

        let initial_investment = input.acquisition.initial_investment();
        let (gross_yield_pct, net_yield_pct) = if initial_investment.is_zero() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let full_year_rent = revenue.full_year_rent() * rent_growth;
            (
                full_year_rent / initial_investment * Decimal::ONE_HUNDRED,
                (gross_rent - cash_charges - tax) / initial_investment * Decimal::ONE_HUNDRED,
            )
        };

        let result = AnnualResult {
            year,
            gross_rent,
            cash_charges,
            deductible_charges,
            recoverable_charges,
            interest: loan.interest,
            loan_insurance: loan.insurance,
            depreciation,
            pre_carryforward_result,
            carryforward_consumed,
            taxable_result,
            tax,
            global_income_tax_saving,
            debt_service: loan.debt_service,
            annual_cashflow,
            monthly_cashflow: annual_cashflow / Decimal::from(12),
            remaining_loan_balance: loan.closing_balance,
            outstanding_carryforward: self.ledger.outstanding(),
            gross_yield_pct,
            net_yield_pct,
        }
        .rounded();

        debug!(
            year,
            pre_carryforward_result = %result.pre_carryforward_result,
            taxable_result = %result.taxable_result,
            tax = %result.tax,
            annual_cashflow = %result.annual_cashflow,
            "Projected year"
        );

        Ok(result)
    }

    /// Regime charge set, net of the tenant-recoverable co-ownership share.
    fn deductible_charges(
        &self,
        charge_growth: Decimal,
        recoverable_charges: Decimal,
    ) -> Decimal {
        let kinds = self.engine.profile.deductible_charges;
        let gross = self.input.charges.sum_of(kinds) * charge_growth;

        if kinds.contains(&ChargeKind::CoOwnership) {
            gross - recoverable_charges
        } else {
            gross
        }
    }

    /// Yearly global-income offset cap, when the household opted in.
    fn deficit_cap(&self) -> Option<Decimal> {
        self.input
            .household
            .offset_property_deficit
            .then_some(self.engine.settings.property_deficit_cap)
    }

    fn check_micro_ceiling(
        &mut self,
        year: u32,
        gross_rent: Decimal,
        ceiling: Decimal,
    ) {
        if gross_rent <= ceiling {
            return;
        }

        warn!(
            year,
            regime = self.engine.profile.regime.as_str(),
            gross_rent = %gross_rent,
            ceiling = %ceiling,
            "Gross rent exceeds the micro regime ceiling"
        );
        self.warnings.push(SimulationWarning::MicroCeilingExceeded {
            year,
            gross_rent: round_half_up(gross_rent),
            ceiling,
        });
    }

    fn tax(
        &self,
        taxable: Decimal,
    ) -> Decimal {
        let profile = &self.engine.profile;
        let settings = self.engine.settings;

        match profile.tax_formula {
            TaxFormula::CorporateTwoTier => corporate_tax(taxable, settings),
            TaxFormula::ProgressivePersonal | TaxFormula::MicroAbated { .. } => {
                if taxable <= Decimal::ZERO {
                    return Decimal::ZERO;
                }
                let marginal = self.marginal_rate.rate_for(taxable);
                let levy = profile
                    .extra_social_contribution_rate
                    .unwrap_or(settings.social_levy_rate);
                taxable * (marginal + levy)
            }
        }
    }

    /// Income tax saved on other household income by a deficit imputed on
    /// it. Social levies are not refunded, so only the marginal rate counts.
    fn global_income_tax_saving(
        &self,
        taxable: Decimal,
    ) -> Decimal {
        let personal = !matches!(
            self.engine.profile.tax_formula,
            TaxFormula::CorporateTwoTier
        );
        if !personal || taxable >= Decimal::ZERO {
            return Decimal::ZERO;
        }
        -taxable * self.marginal_rate.rate_for(taxable)
    }
}

/// Taxable result of a year once losses are recorded or imputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CarryforwardOutcome {
    taxable_result: Decimal,
    consumed: Decimal,
}

/// Records a loss or imputes past losses on a profit.
///
/// `deficit_cap` is the yearly global-income offset allowed to regimes with
/// [`LossTreatment::GlobalIncomeOffset`]; `None` disables the offset.
fn apply_carryforward(
    ledger: &mut LossCarryforward,
    treatment: LossTreatment,
    deficit_cap: Option<Decimal>,
    year: u32,
    result: Decimal,
) -> Result<CarryforwardOutcome, CarryforwardError> {
    if result >= Decimal::ZERO {
        let consumed = ledger.consume(result);
        return Ok(CarryforwardOutcome {
            taxable_result: result - consumed,
            consumed,
        });
    }

    let loss = -result;
    let taxable_result = match (treatment, deficit_cap) {
        (LossTreatment::EntityResult, _) => {
            ledger.record_loss(year, loss)?;
            result
        }
        (LossTreatment::GlobalIncomeOffset, Some(cap)) => {
            let offset = loss.min(cap);
            let excess = max(loss - offset, Decimal::ZERO);
            if !excess.is_zero() {
                ledger.record_loss(year, excess)?;
            }
            -offset
        }
        (LossTreatment::Deferred | LossTreatment::GlobalIncomeOffset, _) => {
            ledger.record_loss(year, loss)?;
            Decimal::ZERO
        }
    };

    Ok(CarryforwardOutcome {
        taxable_result,
        consumed: Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        AcquisitionCost, AnnualCharges, DepreciationDurations, HouseholdTaxProfile, LoanTerms,
        MarginalRate, RentalRevenue,
    };

    fn test_settings() -> TaxSettings {
        TaxSettings::default()
    }

    /// Property bought 150,000 with the 8 % notary fees paid by the down
    /// payment: the loan is exactly 150,000.
    fn test_input() -> SimulationInput {
        SimulationInput {
            acquisition: AcquisitionCost {
                price: dec!(150000),
                land_share_pct: dec!(0),
                down_payment: dec!(12000),
                notary_fees_pct: dec!(8),
                ..AcquisitionCost::default()
            },
            loan: LoanTerms {
                duration_years: 20,
                annual_rate_pct: dec!(3.6),
                insurance_rate_pct: dec!(0.36),
                ..LoanTerms::default()
            },
            charges: AnnualCharges {
                co_ownership: dec!(1000),
                property_tax: dec!(800),
                landlord_insurance: dec!(200),
                housing_tax: dec!(300),
                ..AnnualCharges::default()
            },
            revenue: RentalRevenue {
                monthly_rent: dec!(900),
                vacancy_months: dec!(0),
                ..RentalRevenue::default()
            },
            depreciation: DepreciationDurations::default(),
            household: HouseholdTaxProfile::default(),
        }
    }

    /// Fields are rounded one by one, so derived sums may drift by a cent.
    fn assert_cents_close(
        actual: Decimal,
        expected: Decimal,
    ) {
        assert!(
            (actual - expected).abs() <= dec!(0.05),
            "expected {expected}, got {actual}"
        );
    }

    fn micro_input() -> SimulationInput {
        SimulationInput {
            acquisition: AcquisitionCost {
                price: dec!(120000),
                down_payment: dec!(129600),
                ..AcquisitionCost::default()
            },
            revenue: RentalRevenue {
                monthly_rent: dec!(850),
                vacancy_months: dec!(1),
                ..RentalRevenue::default()
            },
            ..SimulationInput::default()
        }
    }

    // =========================================================================
    // apply_carryforward tests
    // =========================================================================

    #[test]
    fn loss_then_profit_consumes_the_ledger() {
        let mut ledger = LossCarryforward::new();

        let first =
            apply_carryforward(&mut ledger, LossTreatment::Deferred, None, 1, dec!(-1000)).unwrap();
        let second =
            apply_carryforward(&mut ledger, LossTreatment::Deferred, None, 2, dec!(1500)).unwrap();

        assert_eq!(first.taxable_result, Decimal::ZERO);
        assert_eq!(second.taxable_result, dec!(500));
        assert_eq!(second.consumed, dec!(1000));
        assert!(ledger.is_empty());
    }

    #[test]
    fn entity_loss_is_reported_negative_and_carried() {
        let mut ledger = LossCarryforward::new();

        let outcome =
            apply_carryforward(&mut ledger, LossTreatment::EntityResult, None, 1, dec!(-2500))
                .unwrap();

        assert_eq!(outcome.taxable_result, dec!(-2500));
        assert_eq!(ledger.remaining(1), dec!(2500));
    }

    #[test]
    fn global_offset_is_capped() {
        let mut ledger = LossCarryforward::new();

        let outcome = apply_carryforward(
            &mut ledger,
            LossTreatment::GlobalIncomeOffset,
            Some(dec!(10700)),
            3,
            dec!(-14000),
        )
        .unwrap();

        assert_eq!(outcome.taxable_result, dec!(-10700));
        assert_eq!(ledger.remaining(3), dec!(3300));
    }

    #[test]
    fn global_offset_without_opt_in_defers_the_loss() {
        let mut ledger = LossCarryforward::new();

        let outcome = apply_carryforward(
            &mut ledger,
            LossTreatment::GlobalIncomeOffset,
            None,
            1,
            dec!(-4000),
        )
        .unwrap();

        assert_eq!(outcome.taxable_result, Decimal::ZERO);
        assert_eq!(ledger.outstanding(), dec!(4000));
    }

    #[test]
    fn profit_without_losses_is_fully_taxable() {
        let mut ledger = LossCarryforward::new();

        let outcome =
            apply_carryforward(&mut ledger, LossTreatment::Deferred, None, 1, dec!(800)).unwrap();

        assert_eq!(
            outcome,
            CarryforwardOutcome {
                taxable_result: dec!(800),
                consumed: Decimal::ZERO,
            }
        );
    }

    // =========================================================================
    // Micro regime tests
    // =========================================================================

    #[test]
    fn micro_bic_taxes_half_of_gross_rent() {
        let report = simulate(&micro_input(), Regime::MicroBic, &test_settings()).unwrap();
        let year = &report.years[0];

        assert_eq!(report.loan_principal, Decimal::ZERO);
        assert_eq!(year.gross_rent, dec!(9350));
        assert_eq!(year.taxable_result, dec!(4675));
        assert_eq!(year.tax, dec!(2206.60));
        assert_eq!(year.deductible_charges, Decimal::ZERO);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn micro_foncier_uses_thirty_percent_abatement() {
        let report = simulate(&micro_input(), Regime::MicroFoncier, &test_settings()).unwrap();

        // 9,350 × 70 % = 6,545 ; × 47.2 %
        assert_eq!(report.years[0].taxable_result, dec!(6545));
        assert_eq!(report.years[0].tax, dec!(3089.24));
    }

    #[test]
    fn micro_ceiling_breach_is_a_warning() {
        let mut input = micro_input();
        input.revenue.monthly_rent = dec!(1500);

        let report = simulate(&input, Regime::MicroFoncier, &test_settings()).unwrap();

        assert_eq!(report.years.len(), 10);
        assert_eq!(report.warnings.len(), 10);
        assert_eq!(
            report.warnings[0],
            SimulationWarning::MicroCeilingExceeded {
                year: 1,
                gross_rent: dec!(16500),
                ceiling: dec!(15000),
            }
        );
    }

    // =========================================================================
    // Regime rule tests
    // =========================================================================

    #[test]
    fn every_regime_projects_ten_years() {
        let settings = test_settings();

        for regime in Regime::ALL {
            let report = simulate(&test_input(), regime, &settings).unwrap();

            assert_eq!(report.regime, regime);
            assert_eq!(report.years.len(), 10);
            assert_eq!(
                report.years.iter().map(|y| y.year).collect::<Vec<_>>(),
                (1..=10).collect::<Vec<u32>>()
            );
        }
    }

    #[test]
    fn deductible_charges_exclude_recoverable_share() {
        let lmnp = simulate(&test_input(), Regime::LmnpReel, &test_settings()).unwrap();
        let nue = simulate(&test_input(), Regime::LocationNueReel, &test_settings()).unwrap();

        // 1,000 + 800 + 200 + 300 - 800 recoverable
        assert_eq!(lmnp.years[0].deductible_charges, dec!(1500));
        // housing tax is not deductible for unfurnished letting
        assert_eq!(nue.years[0].deductible_charges, dec!(1200));
        assert_eq!(lmnp.years[0].recoverable_charges, dec!(800));
        assert_eq!(lmnp.years[0].cash_charges, dec!(2300));
    }

    #[test]
    fn only_depreciating_regimes_report_depreciation() {
        let settings = test_settings();

        let lmnp = simulate(&test_input(), Regime::LmnpReel, &settings).unwrap();
        let nue = simulate(&test_input(), Regime::LocationNueReel, &settings).unwrap();

        assert_eq!(lmnp.years[0].depreciation, dec!(5000));
        assert_eq!(nue.years[0].depreciation, Decimal::ZERO);
    }

    #[test]
    fn insurance_reported_for_all_but_deducted_by_companies() {
        let settings = test_settings();

        let lmnp = simulate(&test_input(), Regime::LmnpReel, &settings).unwrap();
        let sarl = simulate(&test_input(), Regime::SarlFamille, &settings).unwrap();
        let (l, s) = (&lmnp.years[0], &sarl.years[0]);

        assert_eq!(l.loan_insurance, dec!(540));
        assert_eq!(s.loan_insurance, dec!(540));
        assert_eq!(
            l.pre_carryforward_result - s.pre_carryforward_result,
            dec!(540) - dec!(300)
        );
    }

    #[test]
    fn lmnp_loss_is_deferred_with_zero_tax() {
        let report = simulate(&test_input(), Regime::LmnpReel, &test_settings()).unwrap();
        let year = &report.years[0];

        assert!(year.pre_carryforward_result < Decimal::ZERO);
        assert_eq!(year.taxable_result, Decimal::ZERO);
        assert_eq!(year.tax, Decimal::ZERO);
        assert_eq!(year.outstanding_carryforward, -year.pre_carryforward_result);
    }

    #[test]
    fn lmnp_losses_are_imputed_on_later_indexed_profits() {
        let mut input = test_input();
        input.revenue.rent_indexation_pct = dec!(8);

        let report = simulate(&input, Regime::LmnpReel, &test_settings()).unwrap();
        let years = &report.years;

        assert!(years[0].pre_carryforward_result < Decimal::ZERO);
        assert!(years[0].outstanding_carryforward > Decimal::ZERO);

        let recorded: Decimal = years
            .iter()
            .map(|y| max(-y.pre_carryforward_result, Decimal::ZERO))
            .sum();
        let consumed: Decimal = years.iter().map(|y| y.carryforward_consumed).sum();
        assert_cents_close(consumed, recorded);

        let imputing = years
            .iter()
            .find(|y| y.carryforward_consumed > Decimal::ZERO)
            .unwrap();
        assert!(imputing.year > 1);
        assert_cents_close(
            imputing.taxable_result,
            imputing.pre_carryforward_result - imputing.carryforward_consumed,
        );

        for pair in years.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if after.pre_carryforward_result >= Decimal::ZERO {
                assert_cents_close(
                    after.taxable_result,
                    after.pre_carryforward_result - after.carryforward_consumed,
                );
                assert_cents_close(
                    after.outstanding_carryforward,
                    before.outstanding_carryforward - after.carryforward_consumed,
                );
            }
        }
        assert_eq!(years[9].outstanding_carryforward, Decimal::ZERO);
        assert!(years[9].tax > Decimal::ZERO);
    }

    #[test]
    fn sci_is_losses_reduce_later_corporate_profit() {
        let mut input = test_input();
        input.revenue.rent_indexation_pct = dec!(8);

        let report = simulate(&input, Regime::SciIs, &test_settings()).unwrap();
        let years = &report.years;

        assert_eq!(years[0].taxable_result, years[0].pre_carryforward_result);
        assert_eq!(years[0].tax, Decimal::ZERO);

        let imputing = years
            .iter()
            .find(|y| y.carryforward_consumed > Decimal::ZERO)
            .unwrap();
        assert_cents_close(
            imputing.taxable_result,
            imputing.pre_carryforward_result - imputing.carryforward_consumed,
        );
        assert_eq!(years[9].outstanding_carryforward, Decimal::ZERO);
    }

    #[test]
    fn corporate_regime_reports_negative_result() {
        let report = simulate(&test_input(), Regime::SciIs, &test_settings()).unwrap();
        let year = &report.years[0];

        assert!(year.taxable_result < Decimal::ZERO);
        assert_eq!(year.taxable_result, year.pre_carryforward_result);
        assert_eq!(year.tax, Decimal::ZERO);
    }

    #[test]
    fn corporate_profit_pays_two_tier_tax() {
        let mut input = test_input();
        input.acquisition.down_payment = dec!(162000);
        input.revenue.monthly_rent = dec!(6000);

        let report = simulate(&input, Regime::HoldingIs, &test_settings()).unwrap();
        let year = &report.years[0];

        // 72,000 - 1,200 charges - 5,000 depreciation
        assert_eq!(year.taxable_result, dec!(65800));
        assert_eq!(year.tax, dec!(12200));
    }

    #[test]
    fn lmp_replaces_social_levy_with_contributions() {
        let mut input = test_input();
        input.acquisition.down_payment = dec!(162000);
        input.revenue.monthly_rent = dec!(1000);

        let lmp = simulate(&input, Regime::LmpReel, &test_settings()).unwrap();

        // 12,000 - 1,500 - 5,000 = 5,500 ; × (30 % + 40 %)
        assert_eq!(lmp.years[0].taxable_result, dec!(5500));
        assert_eq!(lmp.years[0].tax, dec!(3850));
    }

    #[test]
    fn global_offset_lowers_tax_when_enabled() {
        let mut input = test_input();
        input.household.offset_property_deficit = true;
        input.charges.maintenance = dec!(20000);

        let report = simulate(&input, Regime::LocationNueReel, &test_settings()).unwrap();
        let year = &report.years[0];

        assert_eq!(year.taxable_result, dec!(-10700));
        assert_eq!(year.tax, Decimal::ZERO);
        // 10,700 × 30 %
        assert_eq!(year.global_income_tax_saving, dec!(3210));
    }

    #[test]
    fn global_offset_saving_stays_out_of_cashflow() {
        let mut input = test_input();
        input.charges.maintenance = dec!(20000);
        let settings = test_settings();

        let deferred = simulate(&input, Regime::LocationNueReel, &settings).unwrap();
        input.household.offset_property_deficit = true;
        let offset = simulate(&input, Regime::LocationNueReel, &settings).unwrap();

        for (d, o) in deferred.years.iter().zip(&offset.years) {
            assert!(o.tax >= Decimal::ZERO);
            assert!(d.tax >= Decimal::ZERO);
            assert_eq!(d.global_income_tax_saving, Decimal::ZERO);
        }
        assert_eq!(offset.years[0].annual_cashflow, deferred.years[0].annual_cashflow);
    }

    #[test]
    fn bracket_mode_uses_household_quotient() {
        let mut input = micro_input();
        input.household.marginal_rate = MarginalRate::Brackets {
            household_income: dec!(20000),
            tax_parts: dec!(1),
        };

        let report = simulate(&input, Regime::MicroBic, &test_settings()).unwrap();

        // 20,000 + 4,675 stays in the 11 % bracket ; × (11 % + 17.2 %)
        assert_eq!(report.years[0].tax, dec!(1318.35));
    }

    // =========================================================================
    // Cashflow and yield tests
    // =========================================================================

    #[test]
    fn cashflow_adds_back_recoverable_charges() {
        let mut input = test_input();
        input.acquisition.down_payment = dec!(162000);

        let report = simulate(&input, Regime::LmnpReel, &test_settings()).unwrap();
        let year = &report.years[0];

        // 10,800 - 1,500 - 5,000 = 4,300 taxed at 47.2 %
        assert_eq!(year.tax, dec!(2029.60));
        // 10,800 - 2,300 + 800 - 2,029.60
        assert_eq!(year.annual_cashflow, dec!(7270.40));
        assert_eq!(year.monthly_cashflow, dec!(605.87));
    }

    #[test]
    fn cashflow_subtracts_debt_service() {
        let report = simulate(&test_input(), Regime::LmnpReel, &test_settings()).unwrap();
        let year = &report.years[0];

        let expected = year.gross_rent - year.cash_charges + year.recoverable_charges
            - year.tax
            - year.debt_service;

        assert!((year.annual_cashflow - expected).abs() <= dec!(0.01));
        assert!(year.annual_cashflow < Decimal::ZERO);
    }

    #[test]
    fn yields_use_initial_investment() {
        let report = simulate(&test_input(), Regime::LmnpReel, &test_settings()).unwrap();

        // 10,800 / 162,000
        assert_eq!(report.years[0].gross_yield_pct, dec!(6.67));
    }

    #[test]
    fn indexation_grows_rent_each_year() {
        let mut input = micro_input();
        input.revenue.rent_indexation_pct = dec!(2);

        let report = simulate(&input, Regime::MicroBic, &test_settings()).unwrap();

        assert_eq!(report.years[0].gross_rent, dec!(9350));
        assert_eq!(report.years[1].gross_rent, dec!(9537));
        assert_eq!(report.years[2].gross_rent, dec!(9727.74));
    }

    // =========================================================================
    // Configuration error tests
    // =========================================================================

    #[test]
    fn invalid_loan_term_fails_before_any_year() {
        let mut input = test_input();
        input.loan.duration_years = 1;
        input.loan.deferral_months = 12;

        let result = simulate(&input, Regime::LmnpReel, &test_settings());

        assert!(matches!(
            result,
            Err(SimulationError::Loan(LoanScheduleError::InvalidLoanTerm { .. }))
        ));
    }

    #[test]
    fn zero_depreciation_duration_fails_for_depreciating_regime() {
        let mut input = test_input();
        input.depreciation.building = 0;

        let result = simulate(&input, Regime::SciIs, &test_settings());

        assert!(matches!(result, Err(SimulationError::Depreciation(_))));
    }

    #[test]
    fn zero_tax_parts_fail_once_in_the_resolver() {
        let mut input = micro_input();
        input.household.marginal_rate = MarginalRate::Brackets {
            household_income: dec!(40000),
            tax_parts: Decimal::ZERO,
        };

        assert_eq!(input.validate(), Ok(()));
        assert_eq!(
            simulate(&input, Regime::MicroBic, &test_settings()),
            Err(SimulationError::IncomeTax(IncomeTaxError::InvalidTaxParts(
                Decimal::ZERO
            )))
        );
    }

    #[test]
    fn loan_beyond_forty_years_is_an_input_error() {
        let mut input = test_input();
        input.loan.annual_rate_pct = dec!(100);

        for years in [70, 400_000_000] {
            input.loan.duration_years = years;

            assert_eq!(
                simulate(&input, Regime::LmnpReel, &test_settings()),
                Err(SimulationError::InvalidInput(
                    InputValidationError::DurationOutOfRange(years)
                ))
            );
        }
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = TaxSettings {
            recoverable_share: dec!(1.5),
            ..TaxSettings::default()
        };

        let result = simulate(&test_input(), Regime::LmnpReel, &settings);

        assert!(matches!(result, Err(SimulationError::InvalidSettings(_))));
    }
}
