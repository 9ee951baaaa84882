use std::process::ExitCode;

use todo_api::{db, seed, Config};

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.database_url.is_none() {
        log::error!("DATABASE_URL must be set to seed the database");
        return ExitCode::FAILURE;
    }

    let state = match db::build_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match seed::seed_demo_data(&state.users, &state.todos).await {
        Ok(report) => {
            log::info!(
                "Database seeding completed: {} users, {} todos",
                report.users_created,
                report.todos_created
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Seeding failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
