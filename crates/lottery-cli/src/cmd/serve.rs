use std::path::Path;

pub fn run(root: &Path, port: u16) -> anyhow::Result<()> {
    lottery_core::paths::require_initialized(root)?;

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!(
            "Lunch lottery API at http://localhost:{actual_port}  (PID {})",
            std::process::id()
        );

        tokio::select! {
            res = lottery_server::serve_on(root_buf, listener) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
