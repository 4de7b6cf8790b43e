#[cfg(feature = "callback")]
pub(crate) fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    beul::execute(future)
}

/// Drives `future` to completion on a dedicated, named thread.
#[cfg(feature = "callback")]
pub(crate) fn spawn_future(future: impl std::future::Future<Output = ()> + Send + 'static) {
    std::thread::Builder::new()
        .name(format!("{} subscription thread", env!("CARGO_PKG_NAME")))
        .spawn(move || block_on(future))
        .expect("failed to spawn thread");
}
