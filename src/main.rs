mod args;
mod config;
mod dispatch;
mod entry;
mod error;
mod http;
mod input;
mod report;
mod request;
mod system;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
