use qingcloud::telemetry;
use qingcloud_cli::cli::completion_command;
use qingcloud_cli::completion::complete_from_env;
use qingcloud_cli::{build_cli, run};

fn main() {
    complete_from_env(completion_command);
    telemetry::init();

    let app = match build_cli() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let matches = app.get_matches();
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run(&matches, &mut stdout) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
