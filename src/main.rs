use clap::Parser;
use podesk::cli::{
    company, context, handle_completions, handle_config_init, health, login, orders, users,
    AppContext, Cli, Commands, CommonArgs, CompanyCommands, ConfigCommands, OrdersCommands,
    UsersCommands,
};
use podesk::client::ApiError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        if matches!(e.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized)) {
            eprintln!("Run `podesk login <username>` to start a new session.");
        }
        std::process::exit(1);
    }
}

/// Load config, start logging, and wire the client stack for one command.
fn setup(common: &CommonArgs) -> Result<AppContext, Box<dyn std::error::Error>> {
    let config = context::load_config(common)?;
    context::init_logging(&config)?;
    Ok(AppContext::build(config))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login(args) => {
            let ctx = setup(&args.common)?;
            let output = ctx.with_monitor(login::handle_login(&args, &ctx)).await?;
            println!("{}", output);
            Ok(())
        }
        Commands::Logout(args) => {
            let ctx = setup(&args.common)?;
            println!("{}", login::handle_logout(&ctx));
            Ok(())
        }
        Commands::Orders(cmd) => match cmd {
            OrdersCommands::List(args) => {
                let ctx = setup(&args.common)?;
                let output = ctx
                    .with_monitor(orders::handle_orders_list(&args, &ctx))
                    .await?;
                println!("{}", output);
                Ok(())
            }
            OrdersCommands::Show(args) => {
                let ctx = setup(&args.common)?;
                let output = ctx
                    .with_monitor(orders::handle_orders_show(&args, &ctx))
                    .await?;
                println!("{}", output);
                Ok(())
            }
            OrdersCommands::Create(args) => {
                let ctx = setup(&args.common)?;
                let output = ctx
                    .with_monitor(orders::handle_orders_create(&args, &ctx))
                    .await?;
                println!("{}", output);
                Ok(())
            }
            OrdersCommands::Update(args) => {
                let ctx = setup(&args.common)?;
                let output = ctx
                    .with_monitor(orders::handle_orders_update(&args, &ctx))
                    .await?;
                println!("{}", output);
                Ok(())
            }
            OrdersCommands::Delete(args) => {
                let ctx = setup(&args.common)?;
                let output = ctx
                    .with_monitor(orders::handle_orders_delete(&args, &ctx))
                    .await?;
                println!("{}", output);
                Ok(())
            }
        },
        Commands::Company(cmd) => match cmd {
            CompanyCommands::Show(args) => {
                let ctx = setup(&args.common)?;
                let output = ctx
                    .with_monitor(company::handle_company_show(&args, &ctx))
                    .await?;
                println!("{}", output);
                Ok(())
            }
            CompanyCommands::Update(args) => {
                let ctx = setup(&args.common)?;
                let output = ctx
                    .with_monitor(company::handle_company_update(&args, &ctx))
                    .await?;
                println!("{}", output);
                Ok(())
            }
        },
        Commands::Users(cmd) => match cmd {
            UsersCommands::List(args) => {
                let ctx = setup(&args.common)?;
                let output = ctx
                    .with_monitor(users::handle_users_list(&args, &ctx))
                    .await?;
                println!("{}", output);
                Ok(())
            }
        },
        Commands::Health(args) => {
            // The health command probes on its own; no background monitor.
            let ctx = setup(&args.common)?;
            let output = health::handle_health(&args, &ctx).await?;
            println!("{}", output);
            Ok(())
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    }
}
