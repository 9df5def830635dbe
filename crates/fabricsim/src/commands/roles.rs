//! Role vocabulary listing.

use serde::Serialize;
use tabled::Tabled;

use fabricsim_core::{FixedBucket, KeyTranslator, SwitchRole};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct RoleSpelling {
    external: &'static str,
    internal: &'static str,
}

#[derive(Tabled)]
struct RoleRow {
    #[tabled(rename = "Role")]
    external: &'static str,
    #[tabled(rename = "Stored As")]
    internal: &'static str,
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let roles = SwitchRole::all()
        .iter()
        .map(|r| {
            Ok(RoleSpelling {
                external: r.external(),
                internal: KeyTranslator::external_to_internal(r.external())?,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    let out = output::render_list(
        &global.format(),
        &roles,
        |r| RoleRow {
            external: r.external,
            internal: r.internal,
        },
        |r| r.external.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
