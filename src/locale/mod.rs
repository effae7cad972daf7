//! Locale-dependent labels, seed lists, and number/date formatting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{FilterMode, FilterState, LabelSet, TransactionKind, YearMonth};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormatStyle {
    /// `31/01/2024`
    DayMonthYear,
    /// `01/31/2024`
    MonthDayYear,
}

/// Number and date conventions of a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: &'static str,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
}

/// User-facing strings of a locale.
#[derive(Debug)]
pub struct Catalog {
    pub income: &'static str,
    pub expense: &'static str,
    pub all_entries: &'static str,
    pub range_joiner: &'static str,
    pub month_year_joiner: &'static str,
    pub month_names: [&'static str; 12],
    pub detail_sheet: &'static str,
    pub summary_sheet: &'static str,
    pub detail_headers: [&'static str; 6],
    pub field_header: &'static str,
    pub value_header: &'static str,
    pub period: &'static str,
    pub total_income: &'static str,
    pub total_expense: &'static str,
    pub balance: &'static str,
    pub by_category: &'static str,
    pub export_stem: &'static str,
    pub default_categories: &'static [&'static str],
    pub default_accounts: &'static [&'static str],
}

static EN_US: Catalog = Catalog {
    income: "Income",
    expense: "Expense",
    all_entries: "All entries",
    range_joiner: "to",
    month_year_joiner: " ",
    month_names: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    detail_sheet: "Entries",
    summary_sheet: "Summary",
    detail_headers: ["Date", "Description", "Type", "Category", "Account", "Amount"],
    field_header: "Field",
    value_header: "Value",
    period: "Period",
    total_income: "Total income",
    total_expense: "Total expenses",
    balance: "Balance",
    by_category: "By category",
    export_stem: "finance-ledger",
    default_categories: &[
        "Salary",
        "Rent",
        "Market",
        "Transport",
        "Leisure",
        "Debts",
        "Investments",
        "Education",
        "Health",
        "Other",
    ],
    default_accounts: &["Wallet", "Checking Account", "Bank", "Savings", "Other"],
};

static PT_BR: Catalog = Catalog {
    income: "Receita",
    expense: "Despesa",
    all_entries: "Todos os lançamentos",
    range_joiner: "até",
    month_year_joiner: " de ",
    month_names: [
        "janeiro",
        "fevereiro",
        "março",
        "abril",
        "maio",
        "junho",
        "julho",
        "agosto",
        "setembro",
        "outubro",
        "novembro",
        "dezembro",
    ],
    detail_sheet: "Lançamentos",
    summary_sheet: "Resumo",
    detail_headers: ["Data", "Descrição", "Tipo", "Categoria", "Conta", "Valor"],
    field_header: "Campo",
    value_header: "Valor",
    period: "Período",
    total_income: "Total de Receitas",
    total_expense: "Total de Despesas",
    balance: "Saldo",
    by_category: "Resumo por Categoria",
    export_stem: "gestao-financeira",
    default_categories: &[
        "Salário",
        "Aluguel",
        "Mercado",
        "Transporte",
        "Lazer",
        "Dívidas",
        "Investimentos",
        "Educação",
        "Saúde",
        "Outros",
    ],
    default_accounts: &["Carteira", "Conta Corrente", "Nubank", "Poupança", "Outros"],
};

/// Formatting conventions, strings, and currency for one locale.
#[derive(Debug, Clone)]
pub struct Locale {
    pub config: LocaleConfig,
    pub currency: CurrencyCode,
    catalog: &'static Catalog,
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl Locale {
    pub fn en_us() -> Self {
        Self {
            config: LocaleConfig {
                language_tag: "en-US",
                decimal_separator: '.',
                grouping_separator: ',',
                date_format: DateFormatStyle::MonthDayYear,
            },
            currency: CurrencyCode::new("USD"),
            catalog: &EN_US,
        }
    }

    pub fn pt_br() -> Self {
        Self {
            config: LocaleConfig {
                language_tag: "pt-BR",
                decimal_separator: ',',
                grouping_separator: '.',
                date_format: DateFormatStyle::DayMonthYear,
            },
            currency: CurrencyCode::new("BRL"),
            catalog: &PT_BR,
        }
    }

    /// Resolves a language tag such as `pt-BR` or `pt_br`. Unknown tags fall back to `en-US`.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "pt-br" | "pt" => Self::pt_br(),
            "en-us" | "en" => Self::en_us(),
            other => {
                tracing::warn!(locale = other, "unsupported locale, using en-US");
                Self::en_us()
            }
        }
    }

    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn kind_label(&self, kind: TransactionKind) -> &'static str {
        match kind {
            TransactionKind::Income => self.catalog.income,
            TransactionKind::Expense => self.catalog.expense,
        }
    }

    pub fn default_categories(&self) -> LabelSet {
        self.catalog.default_categories.iter().copied().collect()
    }

    pub fn default_accounts(&self) -> LabelSet {
        self.catalog.default_accounts.iter().copied().collect()
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        match self.config.date_format {
            DateFormatStyle::DayMonthYear => date.format("%d/%m/%Y").to_string(),
            DateFormatStyle::MonthDayYear => date.format("%m/%d/%Y").to_string(),
        }
    }

    pub fn month_label(&self, month: YearMonth) -> String {
        let name = month
            .month()
            .checked_sub(1)
            .and_then(|idx| self.catalog.month_names.get(idx as usize))
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("{:02}", month.month()));
        format!("{}{}{}", name, self.catalog.month_year_joiner, month.year())
    }

    /// Human-readable description of the window selected by `filter`.
    pub fn period_label(&self, filter: &FilterState) -> String {
        match filter.mode {
            FilterMode::All => self.catalog.all_entries.to_string(),
            FilterMode::SingleMonth => self.month_label(filter.selected_month),
            FilterMode::CustomRange => match filter.bounds() {
                Some((start, end)) => format!(
                    "{} {} {}",
                    self.format_date(start),
                    self.catalog.range_joiner,
                    self.format_date(end)
                ),
                None => self.catalog.all_entries.to_string(),
            },
        }
    }

    pub fn format_currency(&self, amount: f64) -> String {
        format_currency_value(amount, &self.currency, &self.config)
    }
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "BRL" => "R$ ",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        _ => code,
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };
    let mut rendered = format!("{}{}", sign, group_digits(digits, locale.grouping_separator));
    if let Some(fraction) = fraction {
        rendered.push(locale.decimal_separator);
        rendered.push_str(fraction);
    }
    rendered
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol_for(code.as_str()), body)
}
