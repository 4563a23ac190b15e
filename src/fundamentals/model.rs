use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::wire::{de_opt_f64_lenient, de_opt_string_lenient};

/// The three statement endpoints, in the order they are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Income,
    BalanceSheet,
    CashFlow,
}

impl StatementKind {
    /// Fetch order for a symbol.
    pub const ALL: [Self; 3] = [Self::Income, Self::BalanceSheet, Self::CashFlow];

    /// Endpoint path relative to the API base.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Income => "income-statement",
            Self::BalanceSheet => "balance-sheet-statement",
            Self::CashFlow => "cash-flow-statement",
        }
    }

    /// Value written to the `statement` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::BalanceSheet => "balance_sheet",
            Self::CashFlow => "cash_flow",
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filing metadata shared by all three statement types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilingMeta {
    /// The provider's own ticker for the filing; replaced by the resolved symbol on output.
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(rename = "reportedCurrency", default)]
    pub reported_currency: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string_lenient")]
    pub cik: Option<String>,
    /// Spelled the way the provider spells it.
    #[serde(rename = "fillingDate", default)]
    pub filling_date: Option<String>,
    #[serde(rename = "acceptedDate", default)]
    pub accepted_date: Option<String>,
    #[serde(rename = "calendarYear", default, deserialize_with = "de_opt_string_lenient")]
    pub calendar_year: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(rename = "finalLink", default)]
    pub final_link: Option<String>,
}

macro_rules! statement_line {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident => $wire:literal),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            /// Period end date as sent by the provider (`YYYY-MM-DD`).
            #[serde(default, deserialize_with = "de_opt_string_lenient")]
            pub date: Option<String>,
            #[serde(flatten)]
            pub filing: FilingMeta,
            $(
                #[serde(rename = $wire, default, deserialize_with = "de_opt_f64_lenient")]
                pub $field: Option<f64>,
            )*
        }
    };
}

statement_line! {
    /// One period of an income statement.
    IncomeStatementLine {
        revenue => "revenue",
        cost_of_revenue => "costOfRevenue",
        gross_profit => "grossProfit",
        gross_profit_ratio => "grossProfitRatio",
        research_and_development_expenses => "researchAndDevelopmentExpenses",
        general_and_administrative_expenses => "generalAndAdministrativeExpenses",
        selling_and_marketing_expenses => "sellingAndMarketingExpenses",
        selling_general_and_administrative_expenses => "sellingGeneralAndAdministrativeExpenses",
        other_expenses => "otherExpenses",
        operating_expenses => "operatingExpenses",
        cost_and_expenses => "costAndExpenses",
        interest_income => "interestIncome",
        interest_expense => "interestExpense",
        depreciation_and_amortization => "depreciationAndAmortization",
        ebitda => "ebitda",
        ebitda_ratio => "ebitdaratio",
        operating_income => "operatingIncome",
        operating_income_ratio => "operatingIncomeRatio",
        total_other_income_expenses_net => "totalOtherIncomeExpensesNet",
        income_before_tax => "incomeBeforeTax",
        income_before_tax_ratio => "incomeBeforeTaxRatio",
        income_tax_expense => "incomeTaxExpense",
        net_income => "netIncome",
        net_income_ratio => "netIncomeRatio",
        eps => "eps",
        eps_diluted => "epsdiluted",
        weighted_average_shs_out => "weightedAverageShsOut",
        weighted_average_shs_out_dil => "weightedAverageShsOutDil",
    }
}

statement_line! {
    /// One period of a balance sheet.
    BalanceSheetLine {
        cash_and_cash_equivalents => "cashAndCashEquivalents",
        short_term_investments => "shortTermInvestments",
        cash_and_short_term_investments => "cashAndShortTermInvestments",
        net_receivables => "netReceivables",
        inventory => "inventory",
        other_current_assets => "otherCurrentAssets",
        total_current_assets => "totalCurrentAssets",
        property_plant_equipment_net => "propertyPlantEquipmentNet",
        goodwill => "goodwill",
        intangible_assets => "intangibleAssets",
        goodwill_and_intangible_assets => "goodwillAndIntangibleAssets",
        long_term_investments => "longTermInvestments",
        tax_assets => "taxAssets",
        other_non_current_assets => "otherNonCurrentAssets",
        total_non_current_assets => "totalNonCurrentAssets",
        other_assets => "otherAssets",
        total_assets => "totalAssets",
        account_payables => "accountPayables",
        short_term_debt => "shortTermDebt",
        tax_payables => "taxPayables",
        deferred_revenue => "deferredRevenue",
        other_current_liabilities => "otherCurrentLiabilities",
        total_current_liabilities => "totalCurrentLiabilities",
        long_term_debt => "longTermDebt",
        deferred_revenue_non_current => "deferredRevenueNonCurrent",
        deferred_tax_liabilities_non_current => "deferredTaxLiabilitiesNonCurrent",
        other_non_current_liabilities => "otherNonCurrentLiabilities",
        total_non_current_liabilities => "totalNonCurrentLiabilities",
        other_liabilities => "otherLiabilities",
        capital_lease_obligations => "capitalLeaseObligations",
        total_liabilities => "totalLiabilities",
        preferred_stock => "preferredStock",
        common_stock => "commonStock",
        retained_earnings => "retainedEarnings",
        accumulated_other_comprehensive_income_loss => "accumulatedOtherComprehensiveIncomeLoss",
        other_total_stockholders_equity => "othertotalStockholdersEquity",
        total_stockholders_equity => "totalStockholdersEquity",
        total_equity => "totalEquity",
        total_liabilities_and_stockholders_equity => "totalLiabilitiesAndStockholdersEquity",
        minority_interest => "minorityInterest",
        total_liabilities_and_total_equity => "totalLiabilitiesAndTotalEquity",
        total_investments => "totalInvestments",
        total_debt => "totalDebt",
        net_debt => "netDebt",
    }
}

statement_line! {
    /// One period of a cash-flow statement.
    CashFlowLine {
        net_income => "netIncome",
        depreciation_and_amortization => "depreciationAndAmortization",
        deferred_income_tax => "deferredIncomeTax",
        stock_based_compensation => "stockBasedCompensation",
        change_in_working_capital => "changeInWorkingCapital",
        accounts_receivables => "accountsReceivables",
        inventory => "inventory",
        accounts_payables => "accountsPayables",
        other_working_capital => "otherWorkingCapital",
        other_non_cash_items => "otherNonCashItems",
        net_cash_provided_by_operating_activities => "netCashProvidedByOperatingActivities",
        investments_in_property_plant_and_equipment => "investmentsInPropertyPlantAndEquipment",
        acquisitions_net => "acquisitionsNet",
        purchases_of_investments => "purchasesOfInvestments",
        sales_maturities_of_investments => "salesMaturitiesOfInvestments",
        other_investing_activities => "otherInvestingActivites",
        net_cash_used_for_investing_activities => "netCashUsedForInvestingActivites",
        debt_repayment => "debtRepayment",
        common_stock_issued => "commonStockIssued",
        common_stock_repurchased => "commonStockRepurchased",
        dividends_paid => "dividendsPaid",
        other_financing_activities => "otherFinancingActivites",
        net_cash_used_provided_by_financing_activities => "netCashUsedProvidedByFinancingActivities",
        effect_of_forex_changes_on_cash => "effectOfForexChangesOnCash",
        net_change_in_cash => "netChangeInCash",
        cash_at_end_of_period => "cashAtEndOfPeriod",
        cash_at_beginning_of_period => "cashAtBeginningOfPeriod",
        operating_cash_flow => "operatingCashFlow",
        capital_expenditure => "capitalExpenditure",
        free_cash_flow => "freeCashFlow",
    }
}

/// A dated statement record of one of the three known kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementLine {
    Income(IncomeStatementLine),
    BalanceSheet(BalanceSheetLine),
    CashFlow(CashFlowLine),
}

impl StatementLine {
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::Income(_) => StatementKind::Income,
            Self::BalanceSheet(_) => StatementKind::BalanceSheet,
            Self::CashFlow(_) => StatementKind::CashFlow,
        }
    }

    /// Period end date, or `""` when the provider sent none.
    #[must_use]
    pub fn date(&self) -> &str {
        match self {
            Self::Income(l) => l.date.as_deref(),
            Self::BalanceSheet(l) => l.date.as_deref(),
            Self::CashFlow(l) => l.date.as_deref(),
        }
        .unwrap_or_default()
    }

    /// Calendar year of the period end, if `date` is a valid `YYYY-MM-DD`.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(self.date(), "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Serializes the line's own fields, keyed by provider field name.
    pub(crate) fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Income(l) => serde_json::to_value(l),
            Self::BalanceSheet(l) => serde_json::to_value(l),
            Self::CashFlow(l) => serde_json::to_value(l),
        }
    }
}
