//! Lexer running on its own thread
//!
//! [`stream_tokens`] spawns a producer thread that feeds a bounded
//! `sync_channel`.  The producer blocks while the channel is full and the
//! consumer blocks while it is empty; both unblock for good once the lexer
//! has sent `EOF` and dropped its sender.  Tokens arrive in exactly the order
//! the lexer produced them.

use crate::parser::lexer::Lexer;
use crate::parser::token::Token;
use log::{debug, warn};
use std::io;
use std::iter::FusedIterator;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

/// Receiving end of a streamed lexer, usable as a token iterator
pub struct TokenChannel {
    receiver: Receiver<Token>,
    producer: Option<JoinHandle<usize>>,
}

/// Start lexing `source` on a new thread.
///
/// Fails only if the thread cannot be spawned.
pub fn stream_tokens(source: Vec<u8>, capacity: usize) -> io::Result<TokenChannel> {
    let (sender, receiver) = mpsc::sync_channel(capacity);

    let producer = thread::Builder::new()
        .name("lexer".to_string())
        .spawn(move || {
            let mut sent = 0;
            for token in Lexer::new(source) {
                if sender.send(token).is_err() {
                    debug!("token consumer hung up after {} tokens", sent);
                    break;
                }
                sent += 1;
            }
            sent
        })?;

    debug!("lexer thread started (channel capacity {})", capacity);
    Ok(TokenChannel {
        receiver,
        producer: Some(producer),
    })
}

impl TokenChannel {
    fn join_producer(&mut self) {
        if let Some(handle) = self.producer.take() {
            match handle.join() {
                Ok(sent) => debug!("lexer thread finished after {} tokens", sent),
                Err(_) => warn!("lexer thread panicked; treating as end of input"),
            }
        }
    }
}

impl Iterator for TokenChannel {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.receiver.recv() {
            Ok(token) => Some(token),
            Err(_) => {
                // Sender dropped: the lexer is done
                self.join_producer();
                None
            }
        }
    }
}

impl FusedIterator for TokenChannel {}
