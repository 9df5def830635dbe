//! Switch lifecycle command handlers.

use fabricsim_core::{AttributeChange, Category, OverviewAggregator};

use crate::cli::{GlobalOpts, SwitchArgs, SwitchCommand};
use crate::error::CliError;

use super::util;

pub fn handle(
    aggregator: &OverviewAggregator,
    args: SwitchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SwitchCommand::Add { fabric, attrs } => {
            aggregator.on_switch_added(&fabric, &attrs.to_attributes()?)?;
            if !global.quiet {
                eprintln!("Switch added to '{fabric}'");
            }
            Ok(())
        }

        SwitchCommand::Remove { fabric, attrs } => {
            aggregator.on_switch_removed(&fabric, &attrs.to_attributes()?)?;
            if !global.quiet {
                eprintln!("Switch removed from '{fabric}'");
            }
            Ok(())
        }

        SwitchCommand::SetRole { fabric, from, to } => {
            let old = util::engine_value(Category::Role, from.as_deref())?;
            let new = util::engine_value(Category::Role, to.as_deref())?;
            let changed = aggregator.on_role_changed(&fabric, &old, &new)?;
            report_change(global, &fabric, Category::Role, changed);
            Ok(())
        }

        SwitchCommand::Set {
            fabric,
            category,
            from,
            to,
        } => {
            let category = Category::from(category);
            let old = util::engine_value(category, from.as_deref())?;
            let new = util::engine_value(category, to.as_deref())?;
            let change = AttributeChange::new(category, old, new);
            let changed = aggregator.on_attribute_changed(&fabric, &change)?;
            report_change(global, &fabric, category, changed);
            Ok(())
        }
    }
}

fn report_change(global: &GlobalOpts, fabric: &str, category: Category, changed: bool) {
    if global.quiet {
        return;
    }
    if changed {
        eprintln!("Switch {category} updated in '{fabric}'");
    } else {
        eprintln!("Switch {category} unchanged in '{fabric}'");
    }
}
