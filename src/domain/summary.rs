use serde::Serialize;

/// Number of categories shown in the on-screen summary.
pub const TOP_CATEGORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub net: f64,
}

/// Signed net per category, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    /// Adds `signed` to the running net of `category`, creating the entry on first sight.
    pub fn accumulate(&mut self, category: &str, signed: f64) {
        match self.entries.iter_mut().find(|entry| entry.category == category) {
            Some(entry) => entry.net += signed,
            None => self.entries.push(CategoryTotal {
                category: category.to_string(),
                net: signed,
            }),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.net)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Categories by descending absolute net. Ties keep first-appearance order.
    pub fn ranked(&self, limit: Option<usize>) -> Vec<&CategoryTotal> {
        let mut ranked: Vec<&CategoryTotal> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.net.abs().total_cmp(&a.net.abs()));
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }
}

/// Derived aggregate over a filtered transaction set. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub category_totals: CategoryTotals,
}

impl Summary {
    pub fn top_categories(&self) -> Vec<&CategoryTotal> {
        self.category_totals.ranked(Some(TOP_CATEGORY_LIMIT))
    }
}
