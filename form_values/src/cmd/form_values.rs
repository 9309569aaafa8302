/* Binary for inspecting form control fixtures: collect, write and resolve field values */

use clap::{Parser as ClapParser, Subcommand};
use form_values::{ControlId, Form, FormValues, FormValuesConfig, FormValue, ValueMap};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(ClapParser)]
#[command(name = "form-values")]
#[command(about = "Read and write nested values of a form control fixture")]
struct Args {
    /* Control fixture (JSON, or YAML by .yaml/.yml extension) */
    #[arg(short, long, required = true)]
    form: PathBuf,

    /* Engine configuration file */
    #[arg(short, long)]
    config: Option<PathBuf>,

    /* Include disabled controls and options */
    #[arg(long)]
    include_disabled: bool,

    /* Pretty print JSON output */
    #[arg(short, long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /* Print the collected values */
    Get {
        /* Key values by full dotted path */
        #[arg(long)]
        flat: bool,
    },

    /* Write values from a JSON file, then print the collected values */
    Set {
        /* JSON document holding the values */
        values: PathBuf,

        /* The document is a flat map keyed by dotted paths */
        #[arg(long)]
        flat: bool,

        /* Fail on fields without a matching control */
        #[arg(long)]
        strict: bool,
    },

    /* Print the controls holding a dotted field path */
    Inputs {
        field: String,

        /* Report missing fields instead of failing */
        #[arg(long)]
        lenient: bool,
    },

    /* Print the canonical dotted path of the control at a document position */
    Fieldname { index: usize },
}

fn load_form(path: &Path) -> anyhow::Result<Form> {
    let text = std::fs::read_to_string(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let form = if is_yaml {
        Form::from_yaml(&text)?
    } else {
        Form::from_json(&text)?
    };
    Ok(form)
}

fn print_json(value: &serde_json::Value, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn tree_json(values: ValueMap) -> serde_json::Value {
    FormValue::Map(values).to_json()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    /* Build the engine */
    let mut config = match &args.config {
        Some(path) => FormValuesConfig::from_yaml(&std::fs::read_to_string(path)?)?,
        None => FormValuesConfig::default(),
    };
    if args.include_disabled {
        config.include_disabled = true;
    }
    let engine = FormValues::with_config(config);

    let mut form = load_form(&args.form)?;

    match args.command {
        Command::Get { flat } => print_json(&tree_json(engine.get(&form, flat)), args.pretty),
        Command::Set {
            values,
            flat,
            strict,
        } => {
            let values = form_values::value::map_from_json(&std::fs::read_to_string(values)?)?;
            engine.set(&mut form, &values, flat, strict)?;
            print_json(&tree_json(engine.get(&form, false)), args.pretty)
        }
        Command::Inputs { field, lenient } => {
            let ids = engine.inputs(&form, &field, !lenient)?;
            let matched: Vec<serde_json::Value> = ids
                .into_iter()
                .map(|id| {
                    serde_json::json!({
                        "index": id.0,
                        "name": form[id].name,
                        "kind": form[id].kind,
                    })
                })
                .collect();
            print_json(&serde_json::Value::Array(matched), args.pretty)
        }
        Command::Fieldname { index } => {
            let name = engine.fieldname(&form, ControlId(index))?;
            print_json(&serde_json::Value::String(name), args.pretty)
        }
    }
}
