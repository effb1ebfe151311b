use std::{env, process};

use log::error;
use sales_report_lib::{process_sales, Config};

fn main() {
    env_logger::init();

    let config = Config::from_args(env::args_os().skip(1));
    match process_sales(&config) {
        Ok(summary) if summary.all_reports_written() => {
            println!("OK");
            process::exit(0);
        }
        Ok(_) => {
            // failed reports were already logged while writing
            eprintln!("ERROR");
            process::exit(1);
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("ERROR");
            process::exit(1);
        }
    }
}
