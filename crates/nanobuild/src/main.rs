use nanobuild_sdk::Status;
use nanobuild_sdk::orchestrator::BANNER_PREFIX;

fn main() {
    let status = match nanobuild::run() {
        Ok(status) => status,
        Err(err) => {
            eprintln!("{} error: {:#}", BANNER_PREFIX, err);
            println!("\n{}", Status::Failed.banner());
            Status::Failed
        }
    };
    std::process::exit(status.exit_code());
}
