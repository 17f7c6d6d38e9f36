use crate::controls::{
    coerce_choice, coerce_period, fund_type_options, manager_options, period_options,
};
use crate::tables::MetricTables;
use crate::Analyzer;
use configuration::DashboardConfig;
use core_types::{DateRange, Language, Period, Selection};
use dataset::Dataset;
use i18n::Catalog;
use serde::Serialize;
use std::sync::Arc;

/// One period button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodOption {
    pub period: Period,
    pub label: String,
    pub selected: bool,
}

/// Localized title, help text and column headers of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionLabels {
    pub title: String,
    pub help: String,
    /// Headers in display order, starting with the manager column.
    pub columns: Vec<String>,
}

/// Labels of the five tables, in the same layout as `MetricTables`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSections {
    pub growth: SectionLabels,
    pub annualized: SectionLabels,
    pub extremes: SectionLabels,
    pub participants: SectionLabels,
    pub expenses: SectionLabels,
}

/// Localized selector captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlLabels {
    pub fund_type: String,
    pub manager: String,
    pub period: String,
}

/// Everything a presentation layer needs to draw the dashboard once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub selection: Selection,
    pub controls: ControlLabels,
    pub fund_types: Vec<String>,
    pub managers: Vec<String>,
    pub periods: Vec<PeriodOption>,
    /// The resolved window; `None` when the period has no data.
    pub range: Option<DateRange>,
    /// Empty when `range` is `None`.
    pub date_range_label: String,
    pub sections: DashboardSections,
    pub tables: MetricTables,
}

/// The application context: a shared read-only dataset plus the current
/// selection. Every `select_*` call re-applies the selector rules and renders
/// a fresh view.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    dataset: Arc<Dataset>,
    catalog: Arc<Catalog>,
    analyzer: Analyzer,
    max_period_years: u32,
    selection: Selection,
}

impl DashboardSession {
    /// Starts from the configured defaults.
    pub fn new(dataset: Arc<Dataset>, catalog: Arc<Catalog>, config: &DashboardConfig) -> Self {
        let selection = Selection {
            fund_type: config.default_fund_type.clone(),
            manager: config.default_manager.clone(),
            period: config.default_period,
            language: config.default_language,
        };
        Self::with_selection(dataset, catalog, config, selection)
    }

    /// Starts from an explicit selection. Anything not on offer is coerced the
    /// same way an interactive change would be.
    pub fn with_selection(
        dataset: Arc<Dataset>,
        catalog: Arc<Catalog>,
        config: &DashboardConfig,
        selection: Selection,
    ) -> Self {
        let mut session = Self {
            dataset,
            catalog,
            analyzer: Analyzer::new(config),
            max_period_years: config.max_period_years,
            selection,
        };
        session.normalize();
        session
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select_fund_type(&mut self, fund_type: impl Into<String>) -> DashboardView {
        self.selection.fund_type = Some(fund_type.into());
        self.normalize();
        self.view()
    }

    pub fn select_manager(&mut self, manager: impl Into<String>) -> DashboardView {
        self.selection.manager = Some(manager.into());
        self.normalize();
        self.view()
    }

    pub fn select_period(&mut self, period: Period) -> DashboardView {
        self.selection.period = period;
        self.normalize();
        self.view()
    }

    pub fn select_language(&mut self, language: Language) -> DashboardView {
        self.selection.language = language;
        self.view()
    }

    /// The periods currently on offer.
    pub fn periods(&self) -> Vec<Period> {
        period_options(
            &self.dataset,
            self.selection.fund_type.as_deref(),
            self.selection.manager.as_deref(),
            self.max_period_years,
        )
    }

    /// Fund type first, then manager within it, then period for that manager.
    fn normalize(&mut self) {
        let fund_types = fund_type_options(&self.dataset);
        self.selection.fund_type = coerce_choice(self.selection.fund_type.as_deref(), &fund_types);

        let managers = manager_options(&self.dataset, self.selection.fund_type.as_deref());
        self.selection.manager = coerce_choice(self.selection.manager.as_deref(), &managers);

        self.selection.period = coerce_period(self.selection.period, &self.periods());

        tracing::debug!(
            fund_type = ?self.selection.fund_type,
            manager = ?self.selection.manager,
            period = %self.selection.period,
            "Selection normalized."
        );
    }

    /// Renders the current selection.
    pub fn view(&self) -> DashboardView {
        let language = self.selection.language;
        let catalog = &self.catalog;

        let (range, tables) = match self.selection.fund_type.as_deref() {
            Some(fund_type) => {
                let placeholders = catalog.placeholders(language);
                let (report, tables) = self.analyzer.run(
                    &self.dataset,
                    fund_type,
                    self.selection.period,
                    self.selection.manager.as_deref(),
                    &placeholders,
                );
                (report.range, tables)
            }
            None => (None, MetricTables::default()),
        };

        let date_range_label = range
            .map(|r| {
                let (start, end) = (r.start.to_string(), r.end.to_string());
                catalog.format(
                    "label.date_range",
                    language,
                    &[("start", start.as_str()), ("end", end.as_str())],
                )
            })
            .unwrap_or_default();

        let periods = self
            .periods()
            .into_iter()
            .map(|period| PeriodOption {
                period,
                label: catalog.period_label(period, language),
                selected: period == self.selection.period,
            })
            .collect();

        DashboardView {
            title: catalog.text("app.title", language).to_string(),
            selection: self.selection.clone(),
            controls: ControlLabels {
                fund_type: catalog.text("label.fund_type", language).to_string(),
                manager: catalog.text("label.manager", language).to_string(),
                period: catalog.text("label.period", language).to_string(),
            },
            fund_types: fund_type_options(&self.dataset),
            managers: manager_options(&self.dataset, self.selection.fund_type.as_deref()),
            periods,
            range,
            date_range_label,
            sections: sections(catalog, language),
            tables,
        }
    }
}

fn section(catalog: &Catalog, language: Language, key: &str, columns: &[&str]) -> SectionLabels {
    SectionLabels {
        title: catalog.text(&format!("section.{key}.title"), language).to_string(),
        help: catalog.text(&format!("section.{key}.help"), language).to_string(),
        columns: std::iter::once("col.fund")
            .chain(columns.iter().copied())
            .map(|col| catalog.text(col, language).to_string())
            .collect(),
    }
}

fn sections(catalog: &Catalog, language: Language) -> DashboardSections {
    DashboardSections {
        growth: section(catalog, language, "growth", &["col.cumulative_growth"]),
        annualized: section(catalog, language, "avg_return", &["col.avg_yearly_return"]),
        extremes: section(
            catalog,
            language,
            "extremes",
            &["col.worst_quarter", "col.best_quarter"],
        ),
        participants: section(
            catalog,
            language,
            "participants",
            &["col.participants_latest", "col.participants_change"],
        ),
        expenses: section(catalog, language, "expenses", &["col.expense_ratio"]),
    }
}
