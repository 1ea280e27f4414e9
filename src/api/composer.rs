use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{Dataset, MeasurementColumn, Record};
use crate::error::ExplorerResult;
use crate::render::render_chart_document;

use super::vega_lite::{
    ColorChannel, CompositionSpec, Encoding, EncodingChannel, FieldType, FilterTransform,
    IntervalSelect, Mark, MarkType, NamedData, ParamPredicate, PanelSpec, PositionChannel,
    SelectionKind, SelectionParam, VEGA_LITE_SCHEMA, ViewConfig, ViewSize,
};
use super::{ChartDocument, ComposerConfig, CompositionSnapshot};

const COLOR_FIELD: &str = "species";

/// Builds linked scatter/histogram documents over one read-only dataset.
#[derive(Debug, Clone)]
pub struct ChartComposer {
    dataset: Arc<Dataset>,
    config: ComposerConfig,
}

impl ChartComposer {
    pub fn new(dataset: Arc<Dataset>, config: ComposerConfig) -> ExplorerResult<Self> {
        config.validate()?;
        Ok(Self { dataset, config })
    }

    #[must_use]
    pub fn with_default_config(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            config: ComposerConfig::default(),
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Composes the document for an `(x, y)` key pair.
    pub fn compose(&self, x_key: &str, y_key: &str) -> ExplorerResult<ChartDocument> {
        compose_with(&self.dataset, x_key, y_key, &self.config)
    }
}

/// Composes with the default configuration.
pub fn compose(dataset: &Dataset, x_key: &str, y_key: &str) -> ExplorerResult<ChartDocument> {
    compose_with(dataset, x_key, y_key, &ComposerConfig::default())
}

/// Pure composition: the same inputs always produce an equal document.
///
/// Every record is embedded; each panel skips records missing its own
/// fields on the client, and the snapshot counts them per panel.
pub fn compose_with(
    dataset: &Dataset,
    x_key: &str,
    y_key: &str,
    config: &ComposerConfig,
) -> ExplorerResult<ChartDocument> {
    let x_column = MeasurementColumn::from_key(x_key)?;
    let y_column = MeasurementColumn::from_key(y_key)?;
    let histogram_column = config.histogram_column;

    let snapshot = CompositionSnapshot::from_records(
        x_column,
        y_column,
        histogram_column,
        dataset.records(),
        config.max_bins,
    )?;
    if snapshot.plotted_records == 0 {
        warn!(
            x = x_column.key(),
            y = y_column.key(),
            "no record carries both plotted measurements"
        );
    }
    let spec = build_spec(x_column, y_column, dataset.records().to_vec(), config);
    let html = render_chart_document(&spec, &config.embed)?;

    debug!(
        x = x_column.key(),
        y = y_column.key(),
        plotted = snapshot.plotted_records,
        excluded = snapshot.excluded_records,
        histogram = snapshot.histogram_records,
        bins = snapshot.histogram.len(),
        html_bytes = html.len(),
        "composed chart document"
    );

    Ok(ChartDocument::new(spec, snapshot, html))
}

fn build_spec(
    x_column: MeasurementColumn,
    y_column: MeasurementColumn,
    records: Vec<Record>,
    config: &ComposerConfig,
) -> CompositionSpec {
    let mut datasets = IndexMap::with_capacity(1);
    datasets.insert(config.dataset_name.clone(), records);

    CompositionSpec {
        schema: VEGA_LITE_SCHEMA.to_owned(),
        config: ViewConfig {
            view: ViewSize {
                continuous_width: config.panel_width,
                continuous_height: config.panel_height,
            },
        },
        data: NamedData {
            name: config.dataset_name.clone(),
        },
        datasets,
        hconcat: vec![
            scatter_panel(x_column, y_column, config),
            histogram_panel(config),
        ],
    }
}

fn scatter_panel(
    x_column: MeasurementColumn,
    y_column: MeasurementColumn,
    config: &ComposerConfig,
) -> PanelSpec {
    PanelSpec {
        mark: Mark {
            kind: MarkType::Point,
        },
        encoding: Encoding {
            x: PositionChannel::quantitative(x_column.key())
                .with_title(x_column.label())
                .without_zero_baseline(),
            y: PositionChannel::quantitative(y_column.key())
                .with_title(y_column.label())
                .without_zero_baseline(),
            color: species_color(),
        },
        params: vec![SelectionParam {
            name: config.brush_name.clone(),
            select: IntervalSelect {
                kind: SelectionKind::Interval,
                encodings: vec![EncodingChannel::X, EncodingChannel::Y],
            },
        }],
        transform: Vec::new(),
        width: config.panel_width,
        height: config.panel_height,
    }
}

fn histogram_panel(config: &ComposerConfig) -> PanelSpec {
    let column = config.histogram_column;
    PanelSpec {
        mark: Mark {
            kind: MarkType::Bar,
        },
        encoding: Encoding {
            x: PositionChannel::quantitative(column.key())
                .with_title(column.label())
                .binned(config.max_bins),
            y: PositionChannel::count(),
            color: species_color(),
        },
        params: Vec::new(),
        transform: vec![FilterTransform {
            filter: ParamPredicate {
                param: config.brush_name.clone(),
            },
        }],
        width: config.panel_width,
        height: config.panel_height,
    }
}

fn species_color() -> ColorChannel {
    ColorChannel {
        field: COLOR_FIELD.to_owned(),
        kind: FieldType::Nominal,
    }
}
