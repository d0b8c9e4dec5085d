//! Interactive shell: drive the store and page runtime from a REPL.

use panelkit::prelude::*;
use panelkit::runtime::page::build_page;
use panelkit_core::{aggregate::AggregateSpec, record::Record};
use rustyline::{DefaultEditor, error::ReadlineError};
use serde_json::Value;

const HELP: &str = "\
commands:
  resources                         list resource names
  pages                             list page paths
  list <resource> [field=value...]  filtered list
  get <resource> <id>               one record
  create <resource> <json>          insert a record
  update <resource> <id> <json>     shallow-merge a record
  delete <resource> <id>            remove a record
  agg <resource> <field> <kind> [field=value...]
                                    aggregate (count/sum/avg/min/max)
  page <path>                       build a page's components
  help                              this text
  quit";

pub fn run(mut runtime: Runtime, role: Option<String>) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let role = role.as_deref();

    println!("panelkit shell — 'help' for commands");

    loop {
        match editor.readline("panelkit> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;

                if matches!(line, "quit" | "exit") {
                    break;
                }
                if let Err(message) = dispatch(&mut runtime, role, line) {
                    println!("error: {message}");
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

fn dispatch(runtime: &mut Runtime, role: Option<&str>, line: &str) -> Result<(), String> {
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default().trim();

    match command {
        "help" => {
            println!("{HELP}");
            Ok(())
        }
        "resources" => {
            for name in runtime.store().resource_names() {
                println!("{name}");
            }
            Ok(())
        }
        "pages" => {
            for page in &runtime.config().pages {
                println!("{}  {}", page.path, page.title);
            }
            Ok(())
        }
        "list" => cmd_list(runtime, rest),
        "get" => cmd_get(runtime, rest),
        "create" => cmd_create(runtime, rest),
        "update" => cmd_update(runtime, rest),
        "delete" => cmd_delete(runtime, rest),
        "agg" => cmd_aggregate(runtime, rest),
        "page" => cmd_page(runtime, role, rest),
        other => Err(format!("unknown command '{other}' — try 'help'")),
    }
}

// `field=value` pairs into a filter; bare words are rejected.
fn parse_filter(args: &[&str]) -> Result<Filter, String> {
    let mut filter = Filter::new();

    for arg in args {
        let Some((field, value)) = arg.split_once('=') else {
            return Err(format!("expected field=value, got '{arg}'"));
        };
        filter.insert(field.to_string(), Value::String(value.to_string()));
    }

    Ok(filter)
}

fn parse_record(json: &str) -> Result<Record, String> {
    let value: Value = serde_json::from_str(json).map_err(|err| err.to_string())?;

    value
        .as_object()
        .cloned()
        .ok_or_else(|| "expected a JSON object".to_string())
}

fn print_record(record: &Record) {
    println!(
        "{}",
        serde_json::to_string(record).unwrap_or_else(|_| "<unprintable>".to_string())
    );
}

fn cmd_list(runtime: &Runtime, rest: &str) -> Result<(), String> {
    let args: Vec<&str> = rest.split_whitespace().collect();
    let [resource, filter_args @ ..] = args.as_slice() else {
        return Err("usage: list <resource> [field=value...]".to_string());
    };

    let params = ListParams {
        filter: Some(parse_filter(filter_args)?),
        sort: None,
        pagination: None,
    };
    let result = runtime
        .store()
        .get_list(resource, &params)
        .map_err(|err| err.to_string())?;

    for record in &result.data {
        print_record(record);
    }
    println!("total: {}", result.total);

    Ok(())
}

fn cmd_get(runtime: &Runtime, rest: &str) -> Result<(), String> {
    let args: Vec<&str> = rest.split_whitespace().collect();
    let [resource, id] = args.as_slice() else {
        return Err("usage: get <resource> <id>".to_string());
    };

    let record = runtime
        .store()
        .get_one(resource, id)
        .map_err(|err| err.to_string())?;
    print_record(&record);

    Ok(())
}

fn cmd_create(runtime: &mut Runtime, rest: &str) -> Result<(), String> {
    let Some((resource, json)) = rest.split_once(' ') else {
        return Err("usage: create <resource> <json>".to_string());
    };

    let created = runtime
        .store_mut()
        .create(resource.trim(), parse_record(json.trim())?)
        .map_err(|err| err.to_string())?;
    print_record(&created);

    Ok(())
}

fn cmd_update(runtime: &mut Runtime, rest: &str) -> Result<(), String> {
    let mut parts = rest.splitn(3, ' ');
    let (Some(resource), Some(id), Some(json)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err("usage: update <resource> <id> <json>".to_string());
    };

    let updated = runtime
        .store_mut()
        .update(resource, id, &parse_record(json.trim())?)
        .map_err(|err| err.to_string())?;
    print_record(&updated);

    Ok(())
}

fn cmd_delete(runtime: &mut Runtime, rest: &str) -> Result<(), String> {
    let args: Vec<&str> = rest.split_whitespace().collect();
    let [resource, id] = args.as_slice() else {
        return Err("usage: delete <resource> <id>".to_string());
    };

    let deleted = runtime
        .store_mut()
        .delete(resource, id)
        .map_err(|err| err.to_string())?;
    print_record(&deleted);

    Ok(())
}

fn cmd_aggregate(runtime: &Runtime, rest: &str) -> Result<(), String> {
    let args: Vec<&str> = rest.split_whitespace().collect();
    let [resource, field, kind, filter_args @ ..] = args.as_slice() else {
        return Err("usage: agg <resource> <field> <kind> [field=value...]".to_string());
    };

    let spec = AggregateSpec {
        field: (*field).to_string(),
        aggregate: kind.parse().map_err(|err: panelkit_core::error::EngineError| err.to_string())?,
        filter: Some(parse_filter(filter_args)?),
    };
    let result = runtime
        .store()
        .aggregate(resource, &spec)
        .map_err(|err| err.to_string())?;
    println!("{result}");

    Ok(())
}

fn cmd_page(runtime: &Runtime, role: Option<&str>, rest: &str) -> Result<(), String> {
    let path = rest.trim();
    if path.is_empty() {
        return Err("usage: page <path>".to_string());
    }

    let config = runtime.config();
    match resolve_page(config, path, role) {
        PageOutcome::NotFound => Err(format!("no page at '{path}'")),
        PageOutcome::AccessDenied => Err("access denied for this role".to_string()),
        PageOutcome::Allowed(page) => {
            let view = build_page(runtime, role, page);

            println!("{} ({:?} layout)", view.title, view.layout);
            for zone in &view.zones {
                println!("  zone {} [{} col]", zone.name, zone.grid_columns);
                for component in &zone.components {
                    describe(runtime, role, component);
                }
            }

            Ok(())
        }
    }
}

fn describe(runtime: &Runtime, role: Option<&str>, component: &ComponentView) {
    match component {
        ComponentView::MetricCard(metric) => {
            let value = metric
                .error
                .clone()
                .unwrap_or_else(|| metric.display_value());
            println!("    metric '{}': {value}", metric.title);
        }
        ComponentView::Chart(chart) => {
            println!(
                "    chart '{}': {} row(s), series {:?}",
                chart.title,
                chart.rows.len(),
                chart.series_keys
            );
        }
        ComponentView::DataTable(table) => {
            let view = table.view(runtime, role);
            match view.error {
                Some(error) => println!("    table '{}': {error}", view.resource),
                None => println!("    table '{}': {} record(s)", view.resource, view.total),
            }
        }
        ComponentView::SimpleForm(form) => {
            println!(
                "    form on '{}' ({} field(s))",
                form.props().resource,
                form.props().fields.len()
            );
        }
        ComponentView::WizardForm(wizard) => {
            println!(
                "    wizard on '{}' ({} step(s))",
                wizard.props().resource,
                wizard.props().steps.len()
            );
        }
        ComponentView::Tabs(tabs) => {
            println!("    tabs: {:?} (active '{}')", tabs.titles(), tabs.active);
        }
    }
}
