use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ChargeKind, TaxSettings};

/// Fiscal regime under which the rental income is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Regime {
    /// Loueur meublé non professionnel, actual expenses.
    LmnpReel,
    /// Loueur meublé professionnel, actual expenses.
    LmpReel,
    MicroBic,
    /// Unfurnished letting, actual expenses.
    LocationNueReel,
    MicroFoncier,
    /// Property company taxed through its partners' income tax.
    SciIr,
    SarlFamille,
    /// Property company subject to corporate tax.
    SciIs,
    HoldingIs,
}

impl Regime {
    pub const ALL: [Regime; 9] = [
        Self::LmnpReel,
        Self::LmpReel,
        Self::MicroBic,
        Self::LocationNueReel,
        Self::MicroFoncier,
        Self::SciIr,
        Self::SarlFamille,
        Self::SciIs,
        Self::HoldingIs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LmnpReel => "lmnp-reel",
            Self::LmpReel => "lmp-reel",
            Self::MicroBic => "micro-bic",
            Self::LocationNueReel => "location-nue-reel",
            Self::MicroFoncier => "micro-foncier",
            Self::SciIr => "sci-ir",
            Self::SarlFamille => "sarl-famille",
            Self::SciIs => "sci-is",
            Self::HoldingIs => "holding-is",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LmnpReel => "LMNP réel",
            Self::LmpReel => "LMP réel",
            Self::MicroBic => "Micro-BIC",
            Self::LocationNueReel => "Location nue réel",
            Self::MicroFoncier => "Micro-foncier",
            Self::SciIr => "SCI à l'IR",
            Self::SarlFamille => "SARL de famille",
            Self::SciIs => "SCI à l'IS",
            Self::HoldingIs => "Holding à l'IS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|regime| regime.as_str() == s)
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Formula turning the taxable result into tax due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxFormula {
    /// `taxable × (marginal rate + social levy)`.
    ProgressivePersonal,
    /// Flat abatement on gross rent, no deductions at all.
    MicroAbated { abatement: Decimal, ceiling: Decimal },
    /// Reduced rate up to a threshold, standard rate beyond.
    CorporateTwoTier,
}

/// What a year closing with a negative result does to the taxable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossTreatment {
    /// Taxable result is 0, the loss waits in the carryforward ledger.
    Deferred,
    /// Taxable result is the negative net of the entity; the loss is also
    /// carried forward against later profits.
    EntityResult,
    /// Up to the yearly cap offsets global income, the excess is deferred.
    /// Only active when the household opts in.
    GlobalIncomeOffset,
}

const ALL_CHARGES: &[ChargeKind] = &ChargeKind::ALL;

const ALL_BUT_HOUSING_TAX: &[ChargeKind] = &[
    ChargeKind::CoOwnership,
    ChargeKind::LandlordInsurance,
    ChargeKind::RentDefaultInsurance,
    ChargeKind::PropertyTax,
    ChargeKind::Maintenance,
    ChargeKind::Accounting,
    ChargeKind::BankFees,
    ChargeKind::Management,
];

/// Per-regime rules driving the fiscal engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeProfile {
    pub regime: Regime,
    pub allows_depreciation: bool,
    pub deducts_loan_insurance: bool,
    pub deductible_charges: &'static [ChargeKind],
    pub tax_formula: TaxFormula,
    /// Replaces the social levy in the personal formula when set.
    pub extra_social_contribution_rate: Option<Decimal>,
    pub loss_treatment: LossTreatment,
}

impl RegimeProfile {
    /// Builds the profile of `regime` with rates and ceilings read from
    /// `settings`.
    ///
    /// # Example
    ///
    /// ```
    /// use rental_core::{LossTreatment, Regime, RegimeProfile, TaxSettings};
    ///
    /// let profile = RegimeProfile::for_regime(Regime::SciIs, &TaxSettings::default());
    ///
    /// assert!(profile.allows_depreciation);
    /// assert!(profile.deducts_loan_insurance);
    /// assert_eq!(profile.loss_treatment, LossTreatment::EntityResult);
    /// ```
    pub fn for_regime(
        regime: Regime,
        settings: &TaxSettings,
    ) -> Self {
        let base = Self {
            regime,
            allows_depreciation: false,
            deducts_loan_insurance: false,
            deductible_charges: ALL_BUT_HOUSING_TAX,
            tax_formula: TaxFormula::ProgressivePersonal,
            extra_social_contribution_rate: None,
            loss_treatment: LossTreatment::Deferred,
        };

        match regime {
            Regime::LmnpReel => Self {
                allows_depreciation: true,
                deductible_charges: ALL_CHARGES,
                ..base
            },
            Regime::LmpReel => Self {
                allows_depreciation: true,
                deductible_charges: ALL_CHARGES,
                extra_social_contribution_rate: Some(settings.self_employed_contribution_rate),
                ..base
            },
            Regime::MicroBic => Self {
                deductible_charges: &[],
                tax_formula: TaxFormula::MicroAbated {
                    abatement: settings.micro_bic_abatement,
                    ceiling: settings.micro_bic_ceiling,
                },
                ..base
            },
            Regime::LocationNueReel => Self {
                loss_treatment: LossTreatment::GlobalIncomeOffset,
                ..base
            },
            Regime::MicroFoncier => Self {
                deductible_charges: &[],
                tax_formula: TaxFormula::MicroAbated {
                    abatement: settings.micro_foncier_abatement,
                    ceiling: settings.micro_foncier_ceiling,
                },
                ..base
            },
            Regime::SciIr => Self {
                deducts_loan_insurance: true,
                loss_treatment: LossTreatment::GlobalIncomeOffset,
                ..base
            },
            Regime::SarlFamille => Self {
                allows_depreciation: true,
                deducts_loan_insurance: true,
                ..base
            },
            Regime::SciIs | Regime::HoldingIs => Self {
                allows_depreciation: true,
                deducts_loan_insurance: true,
                tax_formula: TaxFormula::CorporateTwoTier,
                loss_treatment: LossTreatment::EntityResult,
                ..base
            },
        }
    }

    pub fn is_micro(&self) -> bool {
        matches!(self.tax_formula, TaxFormula::MicroAbated { .. })
    }
}
