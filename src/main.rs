mod entry;

use reqchain::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
