use gloo_timers::future::TimeoutFuture;

/// Simula la latencia de red de la API mock. Con 0 ms no se programa timer.
pub async fn simulate_latency(ms: u32) {
    if ms == 0 {
        return;
    }
    TimeoutFuture::new(ms).await;
}
