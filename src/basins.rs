//! Expansion of the command-line basin selection into concrete basins.

use anyhow::{Result, bail};

use gqmdes_io::Basin;

use crate::cli::CorrectArgs;
use crate::config::{BasinKind, BasinToml};

/// Which basins a run should correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A single named basin.
    One(String),
    /// Every macro basin.
    Macro,
    /// Every micro basin of the named parent.
    MicroOf(String),
    /// Every configured basin.
    All,
}

impl Selection {
    /// Reads the selection flags of the `correct` subcommand.
    pub fn from_args(args: &CorrectArgs) -> Result<Self> {
        if args.all_basins {
            return Ok(Self::All);
        }
        if args.macro_basins {
            return Ok(Self::Macro);
        }
        match (&args.basin, args.micro) {
            (Some(name), true) => Ok(Self::MicroOf(name.clone())),
            (Some(name), false) => Ok(Self::One(name.clone())),
            (None, _) => bail!("no basin selected: use --basin, --macro, --micro or --all-basins"),
        }
    }
}

/// Resolves `selection` against the configured basins, keeping config order.
pub fn expand(basins: &[BasinToml], selection: &Selection) -> Result<Vec<Basin>> {
    let picked: Vec<&BasinToml> = match selection {
        Selection::All => basins.iter().collect(),
        Selection::Macro => basins
            .iter()
            .filter(|b| b.kind == BasinKind::Macro)
            .collect(),
        Selection::MicroOf(parent) => {
            find(basins, parent)?;
            basins
                .iter()
                .filter(|b| b.kind == BasinKind::Micro && b.parent.as_deref() == Some(parent))
                .collect()
        }
        Selection::One(name) => vec![find(basins, name)?],
    };

    if picked.is_empty() {
        bail!("basin selection {selection:?} matches no configured basin");
    }
    Ok(picked
        .into_iter()
        .map(|b| Basin::new(&b.name, &b.dir_name, &b.full_name))
        .collect())
}

fn find<'a>(basins: &'a [BasinToml], name: &str) -> Result<&'a BasinToml> {
    match basins.iter().find(|b| b.name == name) {
        Some(b) => Ok(b),
        None => bail!("unknown basin: {name:?}"),
    }
}
