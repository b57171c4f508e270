pub mod cli;

use std::io;

use anyhow::{anyhow, Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, shells::Bash};
use json::JsonValue;
use log::{debug, error, warn};

use geocom_lib::commands::{self, Instrument};
use geocom_lib::port::{self, Guard, SerialTransport};
use geocom_lib::protocol::{
    Arg, ArgKind, Code, CommandDescriptor, Engine, Family, GsiWord, Outcome, Payload, Response,
    Status,
};

use cli::{Cli, StructOpt};

enum OutputFormat {
    Plain,
    Json,
}

fn slice_to_column<T>(data: &[T]) -> String
where
    T: std::fmt::Display,
{
    data.iter()
        .map(|item| item.to_string())
        .collect::<Vec<String>>()
        .join("\n")
}

fn word_to_json(word: &GsiWord) -> JsonValue {
    let mut obj = JsonValue::new_object();
    obj["index"] = word.index.into();
    obj["info"] = word.info.clone().into();
    obj["negative"] = word.negative.into();
    obj["value"] = word.value().into();
    obj["width"] = word.width.to_string().into();
    obj
}

fn payload_to_json(payload: &Payload) -> JsonValue {
    match payload {
        Payload::Params(params) => params.clone().into(),
        Payload::Word(word) => word_to_json(word),
        Payload::Setting { param, value } => {
            let mut obj = JsonValue::new_object();
            obj["param"] = (*param).into();
            obj["value"] = value.clone().into();
            obj
        }
    }
}

fn status_to_json(status: &Status) -> JsonValue {
    let mut obj = JsonValue::new_object();
    match status {
        Status::GeoCom { transport, rpc } => {
            obj["transport"] = transport.code().into();
            obj["rpc"] = rpc.code().into();
            obj["name"] = rpc.name().into();
        }
        Status::Gsi { code } => obj["code"] = (*code).into(),
        Status::GsiError(err) => {
            obj["code"] = err.code.into();
            obj["warning"] = err.warning.into();
        }
    }
    obj["text"] = status.to_string().into();
    obj
}

fn response_to_json(response: &Response) -> JsonValue {
    let mut obj = JsonValue::new_object();
    obj["name"] = response.name.as_str().into();
    obj["command"] = response.command.as_str().into();
    obj["reply"] = response.reply.clone().into();
    obj["success"] = response.is_success().into();
    if let Some(status) = &response.status {
        obj["status"] = status_to_json(status);
    }
    if let Some(arity) = &response.arity {
        obj["arity"] = arity.to_string().into();
    }
    match &response.outcome {
        Outcome::Success(payload) => {
            obj["payload"] = payload.as_ref().map(payload_to_json).unwrap_or(JsonValue::Null);
        }
        Outcome::Failure(failure) => {
            obj["failure"] = failure.class.to_string().into();
            obj["params"] = failure.params.clone().into();
            obj["diagnostic"] = failure.diagnostic.as_str().into();
        }
    }
    obj
}

fn payload_to_line(payload: &Payload) -> String {
    match payload {
        Payload::Params(params) => params.join(","),
        Payload::Word(word) => word.to_string(),
        Payload::Setting { value, .. } => value.clone(),
    }
}

fn render(response: Response, fmt: OutputFormat) -> Result<String> {
    match fmt {
        OutputFormat::Json => Ok(json::stringify(response_to_json(&response))),
        OutputFormat::Plain => match &response.outcome {
            Outcome::Success(payload) => Ok(payload
                .as_ref()
                .map(payload_to_line)
                .unwrap_or_default()),
            Outcome::Failure(_) => Err(anyhow!("{}", response)),
        },
    }
}

fn cmd_list_instruments(fmt: OutputFormat) -> Result<String> {
    let instruments: Vec<String> = commands::list_instruments()
        .iter()
        .map(|instrument| instrument.to_string())
        .collect();
    Ok(match fmt {
        OutputFormat::Plain => slice_to_column(instruments.as_slice()),
        OutputFormat::Json => json::stringify(instruments),
    })
}

fn cmd_list_commands(instrument: Instrument, fmt: OutputFormat) -> Result<String> {
    let cmds = commands::list_commands(instrument);
    if cmds.is_empty() {
        return Err(anyhow!("No commands known for {}", instrument));
    }

    Ok(match fmt {
        OutputFormat::Plain => slice_to_column(cmds.as_slice()),
        OutputFormat::Json => {
            let list: Vec<JsonValue> = cmds
                .iter()
                .map(|cmd| {
                    let mut obj = JsonValue::new_object();
                    obj["name"] = cmd.name.into();
                    obj["op"] = cmd.op.to_string().into();
                    obj["args"] = cmd
                        .args
                        .iter()
                        .map(|kind| kind.to_string())
                        .collect::<Vec<_>>()
                        .into();
                    obj["returns"] = cmd.returns.into();
                    obj
                })
                .collect();
            json::stringify(list)
        }
    })
}

fn cmd_rpc(
    instrument: Instrument,
    code: u16,
    args: Vec<Arg>,
    returns: Option<usize>,
) -> CommandDescriptor {
    let known = commands::find_rpc(instrument, code);
    let returns = returns.or_else(|| known.map(|cmd| cmd.returns)).unwrap_or(0);
    let desc = CommandDescriptor::rpc(code, args, returns);
    match known {
        Some(cmd) => desc.named(cmd.name),
        None => desc,
    }
}

fn cmd_call(instrument: Instrument, name: &str, args: &[String]) -> Result<CommandDescriptor> {
    let cmd = commands::find_command(instrument, name)
        .ok_or_else(|| anyhow!("Command {} not found for {}", name, instrument))?;

    let values = args
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let kind = cmd.args.get(index).copied().unwrap_or(ArgKind::Str);
            cli::parse_value(kind, text)
                .with_context(|| format!("Bad argument {} for {}", index + 1, cmd.name))
        })
        .collect::<Result<Vec<_>, _>>()?;

    cmd.descriptor(values)
        .with_context(|| format!("Cannot build {}", cmd.name))
}

fn open_engine(cli: &Cli) -> Result<Engine<SerialTransport>> {
    let transport = port::open_port(&cli.port, cli.baudrate, cli.force)?;
    let mut config = cli.instrument.guard_config(cli.timeout, cli.retries + 1);
    if !cli.wakeup {
        config.wake_up = None;
    }
    let mut engine_config = cli.instrument.engine_config();
    if let Some(dialect) = cli.dialect {
        engine_config.dialect = dialect;
    }
    Ok(Engine::new(Guard::new(transport, config), engine_config))
}

// Settings that change framing are read from the instrument first.
fn sync_session(engine: &mut Engine<SerialTransport>, desc: &CommandDescriptor) -> Result<()> {
    match desc.family() {
        Family::GeoCom if desc.args().iter().any(|arg| arg.kind == ArgKind::Float) => {
            let response = engine
                .sync_precision()
                .context("Failed to read float precision")?;
            debug!("{}", response);
        }
        Family::GsiMeasurement if matches!(desc.code(), Code::Put(_)) => {
            let response = engine
                .sync_word_width()
                .context("Failed to read GSI word width")?;
            debug!("{}", response);
        }
        _ => {}
    }
    Ok(())
}

fn cmd_exchange(cli: &Cli, desc: CommandDescriptor, fmt: OutputFormat) -> Result<String> {
    let mut engine = open_engine(cli)?;
    sync_session(&mut engine, &desc)?;
    let response = engine
        .request(&desc)
        .with_context(|| format!("{} failed", desc.name()))?;
    render(response, fmt)
}

fn do_main() -> Result<String> {
    if std::env::var("GENERATE_COMPLETION").is_ok() {
        generate(
            Bash,
            &mut cli::Cli::command(),
            "geocom-tool",
            &mut io::stdout(),
        );

        return Ok(String::default());
    }

    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if cli.debug {
        "debug"
    } else {
        "info"
    }))
    .format_timestamp(None)
    .format_target(false)
    .init();

    let fmt = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Plain
    };

    let desc = match &cli.command {
        cli::Commands::ListInstruments => return cmd_list_instruments(fmt),
        cli::Commands::ListCommands { instrument } => return cmd_list_commands(*instrument, fmt),
        cli::Commands::Rpc {
            code,
            args,
            returns,
        } => cmd_rpc(
            cli.instrument,
            *code,
            args.iter().map(|arg| (**arg).clone()).collect(),
            *returns,
        ),
        cli::Commands::Call { name, args } => cmd_call(cli.instrument, name, args)?,
        cli::Commands::Set { param, value } => {
            CommandDescriptor::set(*param, (**value).clone()).named(format!("SET/{}", param))
        }
        cli::Commands::Conf { param } => {
            CommandDescriptor::conf(*param).named(format!("CONF/{}", param))
        }
        cli::Commands::Get { mode, index } => {
            CommandDescriptor::get(*mode, *index).named(format!("GET/{}/WI{}", mode, index))
        }
        cli::Commands::Put { index, data } => {
            CommandDescriptor::put(*index, Arg::string(data.as_str()))
                .named(format!("PUT WI{}", index))
        }
        cli::Commands::Raw { command } => CommandDescriptor::raw(command.clone()),
    };

    if (desc.family() == Family::GeoCom) != cli.instrument.is_geocom() {
        warn!("{} request on a {} profile", desc.family(), cli.instrument);
    }

    cmd_exchange(&cli, desc, fmt)
}

fn main() {
    match do_main() {
        Ok(s) => println!("{}", s),
        Err(e) => error!("{:#}", e),
    }
}
