use std::process::exit;

use log::{error, info};

use word_freq::directory::count_directory;
use word_freq::logging::set_logger_or_exit;
use word_freq::util::*;

fn main() {
    let conf = parse_args("count the words of every document in a directory");
    set_logger_or_exit(&conf.log, conf.log_level);

    match count_directory(&conf) {
        Ok(summary) => {
            let (u_time, s_time) = get_cputime_usecs();
            info!(
                "{} documents, {} words; cpu time user {}us system {}us",
                summary.documents, summary.total_words, u_time, s_time
            );
        }
        Err(err) => {
            error!("{}", err);
            exit(err.exit_code());
        }
    }
}
