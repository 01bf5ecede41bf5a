//! FILENAME: app/dashboard/src/main.rs

fn main() -> anyhow::Result<()> {
    sales_dashboard::cli::main()
}
