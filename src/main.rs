use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use funclog::actions;
use funclog::{Config, Logger};

#[derive(Parser, Debug)]
#[command(name = "funclog")]
#[command(about = "Выполняет действие через логгер вызовов и дописывает запись в журнал")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "funclog.toml")]
    config: String,

    /// Режим сухого запуска (журнал не пишется на диск)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию берётся из конфигурации)
    #[arg(long)]
    log_level: Option<String>,

    /// Уровень записей журнала вызовов: info, log, debug, error, panic
    #[arg(long)]
    severity: Option<String>,

    #[command(subcommand)]
    command: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Поприветствовать по имени
    Greet { name: String },
    /// Сложить два числа
    Add { a: i64, b: i64 },
    /// Запустить shell-команду и дождаться завершения
    Spawn {
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
    /// То же, что spawn, но через tokio::process
    SpawnAsync {
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
    /// Показать итоговую конфигурацию
    ShowConfig,
}

fn add(a: i64, b: i64) -> i64 {
    a + b
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Config::load(&args.config)?;

    // Инициализация системы логирования
    let filter = args.log_level.as_deref().unwrap_or(&config.logging.filter);
    init_tracing(filter, &config.logging.format)?;

    info!("Запуск funclog v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - журнал вызовов не пишется на диск");
    }

    let logger = Logger::from_config(&config.recorder, args.dry_run);
    if let Some(severity) = &args.severity {
        logger.set_level(severity);
    }

    match args.command {
        Action::Greet { name } => {
            let greet = logger.instrument(actions::greet);
            println!("{}", greet.call((name.as_str(),)));
        }
        Action::Add { a, b } => {
            let add = logger.instrument(add);
            println!("{}", add.call((a, b)));
        }
        Action::Spawn { command } => {
            let spawn = logger.instrument(actions::spawn);
            let code = spawn.call((command.join(" ").as_str(),))?;
            info!("Команда завершилась с кодом {}", code);
        }
        Action::SpawnAsync { command } => {
            let spawn = logger.instrument_async("spawn_async", actions::spawn_async);
            let code = spawn.call((command.join(" "),)).await?;
            info!("Команда завершилась с кодом {}", code);
        }
        Action::ShowConfig => {
            println!("{:#?}", config);
        }
    }

    Ok(())
}

fn init_tracing(filter: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))?;
    let registry = tracing_subscriber::registry().with(filter);

    // format уже проверен в Config::validate
    if format == "full" {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
