//! Result summary and output-file writing.

use crate::cost::{bounding_extents, total_wirelength, CostModel};
use mosaic_geom::Design;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Final position of one block, as corner coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPlacement {
    /// Block name.
    pub name: String,
    /// Lower-left x.
    pub x0: i64,
    /// Lower-left y.
    pub y0: i64,
    /// Upper-right x.
    pub x1: i64,
    /// Upper-right y.
    pub y1: i64,
}

/// Everything the output file reports about a finished run.
#[derive(Debug, Clone)]
pub struct FloorplanResult {
    /// Final scalar cost.
    pub cost: f64,
    /// Total half-perimeter wirelength.
    pub wirelength: f64,
    /// Area of the bounding box of placed blocks.
    pub area: i64,
    /// Outline width.
    pub width: i64,
    /// Outline height.
    pub height: i64,
    /// Wall-clock time of the run.
    pub runtime: Duration,
    /// Placed blocks in design order. Unplaced blocks are omitted.
    pub blocks: Vec<BlockPlacement>,
}

impl FloorplanResult {
    /// Summarizes the placement currently held by the design.
    ///
    /// `width`/`height` report the fixed outline the placement was run
    /// against; `area` is the tighter bounding box the blocks actually use.
    pub fn from_design(design: &Design, model: &CostModel, runtime: Duration) -> Self {
        let (extent_x, extent_y) = bounding_extents(design);
        let blocks = design
            .blocks
            .iter()
            .filter(|b| b.placed)
            .map(|b| BlockPlacement {
                name: b.name.clone(),
                x0: b.x,
                y0: b.y,
                x1: b.x_max(),
                y1: b.y_max(),
            })
            .collect();
        Self {
            cost: model.cost(design),
            wirelength: total_wirelength(design),
            area: extent_x * extent_y,
            width: design.outline.width,
            height: design.outline.height,
            runtime,
            blocks,
        }
    }

    /// Writes the report: a header of run metrics, then one line per
    /// placed block with its corner coordinates.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Cost {}", self.cost)?;
        writeln!(out, "Wirelength {}", self.wirelength)?;
        writeln!(out, "Area {}", self.area)?;
        writeln!(out, "Width {}", self.width)?;
        writeln!(out, "Height {}", self.height)?;
        writeln!(out, "RunTime {}", self.runtime.as_secs_f64())?;
        for b in &self.blocks {
            writeln!(out, "{} {} {} {} {}", b.name, b.x0, b.y0, b.x1, b.y1)?;
        }
        Ok(())
    }

    /// Writes the report to a file, creating or truncating it.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()
    }
}
