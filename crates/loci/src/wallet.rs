//! Mock settlement wallet: deterministic USDC transfers.
//!
//! Simulates an EVM wallet for demos and tests. Cumulative counters
//! (block height, transfer nonce, total sent) live behind a mutex on the
//! wallet itself, so one instance can be shared across concurrent runs.
//! Optional latency makes demo settlements feel asynchronous; receipts
//! stay fully deterministic either way.

use std::sync::Mutex;
use std::time::Duration;

/// Result of one settled (mock) transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    /// Whether the transfer settled. Always true for the mock.
    pub success: bool,
    /// Transaction identifier, derived from the transfer nonce.
    pub tx_hash: String,
    /// Block the transfer was confirmed in.
    pub block: u64,
    /// Amount transferred.
    pub amount_usdc: f64,
}

#[derive(Debug)]
struct Ledger {
    block: u64,
    nonce: u64,
    total_sent_usdc: f64,
}

/// Mock EVM wallet with a lock-protected cumulative ledger.
///
/// **Interaction**: Shared as `Arc<MockEvmWallet>` into
/// `argue::PayoutNode`; every send increments the nonce and block and
/// accumulates the total, under a single lock.
#[derive(Debug)]
pub struct MockEvmWallet {
    ledger: Mutex<Ledger>,
    latency: Option<Duration>,
}

impl Default for MockEvmWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEvmWallet {
    /// Fresh wallet at the fixed genesis block, nothing sent.
    pub fn new() -> Self {
        Self {
            ledger: Mutex::new(Ledger {
                block: 849_201,
                nonce: 0,
                total_sent_usdc: 0.0,
            }),
            latency: None,
        }
    }

    /// Adds settlement latency per send (builder). Demos use this to
    /// make the mock feel like a real chain; tests leave it off.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Sends `amount_usdc` to `to_address` and returns the receipt.
    ///
    /// Deterministic: the nth send on a wallet always yields the same
    /// hash and block, regardless of address or amount.
    pub async fn send_usdc(&self, to_address: &str, amount_usdc: f64) -> TransferReceipt {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let (nonce, block) = {
            let mut ledger = self.ledger.lock().expect("wallet ledger lock");
            ledger.nonce += 1;
            ledger.block += 1;
            ledger.total_sent_usdc += amount_usdc;
            (ledger.nonce, ledger.block)
        };
        tracing::info!(gas_eth = 0.00032, "gas burned");
        let tag = format!("MOCK{nonce}");
        let tx_hash = format!("0x{tag:0<64}");
        tracing::info!(%to_address, amount_usdc, block, "transfer confirmed");
        TransferReceipt {
            success: true,
            tx_hash,
            block,
            amount_usdc,
        }
    }

    /// Total USDC sent through this wallet.
    pub fn total_sent_usdc(&self) -> f64 {
        self.ledger.lock().expect("wallet ledger lock").total_sent_usdc
    }

    /// Number of transfers settled by this wallet.
    pub fn transfer_count(&self) -> u64 {
        self.ledger.lock().expect("wallet ledger lock").nonce
    }

    /// Current block height.
    pub fn block_height(&self) -> u64 {
        self.ledger.lock().expect("wallet ledger lock").block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn receipts_are_deterministic_per_nonce() {
        let wallet = MockEvmWallet::new();
        let first = wallet.send_usdc("0xabc", 1.0).await;
        let second = wallet.send_usdc("0xdef", 2.5).await;
        assert!(first.success);
        assert!(first.tx_hash.starts_with("0xMOCK1"));
        assert!(second.tx_hash.starts_with("0xMOCK2"));
        assert_eq!(first.tx_hash.len(), 2 + 64);
        assert_eq!(second.block, first.block + 1);

        // A fresh wallet replays the same receipts.
        let replay = MockEvmWallet::new().send_usdc("0xabc", 1.0).await;
        assert_eq!(replay, first);
    }

    #[tokio::test]
    async fn ledger_accumulates() {
        let wallet = MockEvmWallet::new();
        wallet.send_usdc("0xabc", 1.0).await;
        wallet.send_usdc("0xabc", 0.5).await;
        assert_eq!(wallet.transfer_count(), 2);
        assert!((wallet.total_sent_usdc() - 1.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn concurrent_sends_serialize_on_the_ledger() {
        let wallet = Arc::new(MockEvmWallet::new());
        let a = tokio::spawn({
            let w = wallet.clone();
            async move { w.send_usdc("0xaaa", 1.0).await }
        });
        let b = tokio::spawn({
            let w = wallet.clone();
            async move { w.send_usdc("0xbbb", 1.0).await }
        });
        let (ra, rb) = (a.await.unwrap(), b.await.unwrap());
        assert_ne!(ra.tx_hash, rb.tx_hash);
        assert_eq!(wallet.transfer_count(), 2);
        assert!((wallet.total_sent_usdc() - 2.0).abs() < f64::EPSILON);
    }
}
