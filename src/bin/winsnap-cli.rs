use winsnap::ipc::IpcClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> winsnap::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: winsnap-cli <command> [args...]");
        eprintln!(
            "Commands: snap-left, snap-right, snap-up, snap-down, \
             snap-left-half, snap-right-half, ping, status, reload, quit, help"
        );
        std::process::exit(1);
    }

    let command = &args[1];
    let command_args = args[2..].to_vec();

    let socket_path = "/tmp/winsnap.sock";

    if let Err(e) = IpcClient::run_command(socket_path, command, command_args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
