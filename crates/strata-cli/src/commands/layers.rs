use serde::Serialize;
use strata_core::Layer;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct LayerRow {
    pub layer: Layer,
    pub rank: Option<u8>,
    pub name: &'static str,
}

/// Handle `strata layers`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&rows(), flags.format)
}

fn rows() -> Vec<LayerRow> {
    Layer::ALL
        .into_iter()
        .map(|layer| LayerRow {
            layer,
            rank: layer.rank(),
            name: layer.display_name(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_rows_are_listed_lowest_first() {
        let rows = rows();
        assert_eq!(rows.len(), Layer::ALL.len());
        assert_eq!(rows[0].rank, None);
        assert_eq!(rows[1].layer, Layer::Entity);
        assert_eq!(rows.last().map(|r| r.layer), Some(Layer::Web));
    }
}
