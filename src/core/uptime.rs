//! Background uptime polling with an explicit stop signal.

use crate::adapters::http::PageFetcher;
use crate::domain::model::{UptimeSample, UptimeStatus};
use chrono::Local;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const SAMPLE_BUFFER: usize = 32;

/// 單次抓取轉成一筆樣本，錯誤也是樣本
pub async fn poll_once(fetcher: &PageFetcher, url: &str, timeout: Duration) -> UptimeSample {
    let status = match fetcher.fetch(url, timeout).await {
        Ok(result) => UptimeStatus::Up {
            status_code: result.status_code,
        },
        Err(e) => UptimeStatus::Down {
            reason: e.to_string(),
        },
    };
    UptimeSample {
        checked_at: Local::now(),
        status,
    }
}

/// 背景輪詢的控制把手；drop 時停止訊號通道關閉，任務也會結束
pub struct UptimeMonitor {
    samples: mpsc::Receiver<UptimeSample>,
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl UptimeMonitor {
    pub fn spawn(fetcher: PageFetcher, url: String, interval: Duration, timeout: Duration) -> Self {
        let (sample_tx, samples) = mpsc::channel(SAMPLE_BUFFER);
        let (stop_tx, stop_rx) = watch::channel(false);

        tracing::info!("🔁 Uptime monitoring {} every {:?}", url, interval);
        let handle = tokio::spawn(poll_loop(fetcher, url, interval, timeout, sample_tx, stop_rx));

        Self {
            samples,
            stop_tx,
            handle,
        }
    }

    /// 等待下一筆樣本；輪詢結束後回傳 None
    pub async fn next_sample(&mut self) -> Option<UptimeSample> {
        self.samples.recv().await
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// 送出停止訊號並等待背景任務結束
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        drop(self.samples);
        if let Err(e) = self.handle.await {
            tracing::warn!("Uptime task ended abnormally: {}", e);
        }
        tracing::info!("⏹️ Uptime monitoring stopped");
    }
}

async fn poll_loop(
    fetcher: PageFetcher,
    url: String,
    interval: Duration,
    timeout: Duration,
    samples: mpsc::Sender<UptimeSample>,
    mut stop: watch::Receiver<bool>,
) {
    loop {
        let sample = tokio::select! {
            sample = poll_once(&fetcher, &url, timeout) => sample,
            _ = stop.changed() => break,
        };

        match &sample.status {
            UptimeStatus::Up { status_code } => tracing::debug!("Uptime {} -> {}", url, status_code),
            UptimeStatus::Down { reason } => tracing::warn!("Uptime check failed: {}", reason),
        }

        if samples.send(sample).await.is_err() {
            // 接收端已關閉
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = stop.changed() => break,
        }
    }
}
