fn main() -> anyhow::Result<()> {
    quickclip::bootstrap::run_app()
}
