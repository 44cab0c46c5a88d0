//! Defines the Component trait, used by each stage that sits between the
//! keyboard and a screen. A component consumes data from the preceding stage,
//! processes it, and passes new data to the next one, so stages can be
//! chained over channels: frames into a [BrailleDecoder](crate::decoder::BrailleDecoder),
//! events into a [TypedLine](crate::typed_line::TypedLine), and so on.

use log::{info, warn};
use std::fmt;
use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Why a component could not shut down cleanly.
#[derive(Debug)]
pub enum ComponentError {
    /// Flushing or closing an output failed.
    IoError(io::Error),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentError::IoError(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for ComponentError {}

impl From<io::Error> for ComponentError {
    fn from(value: io::Error) -> Self {
        ComponentError::IoError(value)
    }
}

///
/// A stage of the input pipeline. Anything that turns one kind of input
/// into another implements Component so it can be run on its own thread
/// with [run_component].
///
pub trait Component: fmt::Display {
    /// What the stage consumes.
    type InData;
    /// What the stage produces.
    type OutData;

    /// Converts an input of type InData into an output of type OutData
    fn convert(&mut self, input: Self::InData) -> Self::OutData;

    /// Cleans up once the input channel has closed
    fn finalize(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }
}

/// Runs the given Component on its own thread. On receiving data of type
/// InData on the input channel, the Component converts them to data of type
/// OutData and sends it to the output channel. Once every sender of the
/// input channel is gone the Component is finalized and the thread ends,
/// dropping its output channel.
pub fn run_component<C: Component + Send + 'static>(
    mut component: Box<C>,
    input: Receiver<<C as Component>::InData>,
    output: Sender<<C as Component>::OutData>,
) -> JoinHandle<()>
where
    <C as Component>::InData: Send + 'static,
    <C as Component>::OutData: Send + 'static,
{
    thread::spawn(move || {
        while let Ok(data) = input.recv() {
            let out_data = component.convert(data);
            if let Err(error) = output.send(out_data) {
                warn!("{} : received error {}.", component, error);
            }
        }

        if let Err(component_error) = component.finalize() {
            warn!(
                "{} : error during terminating : {component_error}.",
                component
            );
        }
        info!("{} : terminated.", component);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{BrailleDecoder, BrailleEvent};
    use crate::typed_line::TypedLine;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::channel,
        Arc,
    };

    /// Null MockComponent for compilation testing
    struct MockComponent {}

    impl Component for MockComponent {
        type InData = i32;
        type OutData = i32;

        fn convert(&mut self, input: i32) -> i32 {
            input + 1
        }
    }

    impl fmt::Display for MockComponent {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "MockComponent")
        }
    }

    /// Sums its input and reports the total when finalized.
    struct SummingComponent {
        total: i32,
        finalized: Arc<AtomicUsize>,
        fail_on_finalize: bool,
    }

    impl Component for SummingComponent {
        type InData = i32;
        type OutData = i32;

        fn convert(&mut self, input: i32) -> i32 {
            self.total += input;
            self.total
        }

        fn finalize(&mut self) -> Result<(), ComponentError> {
            self.finalized.fetch_add(1, Ordering::SeqCst);
            if self.fail_on_finalize {
                return Err(io::Error::new(io::ErrorKind::Other, "sink closed").into());
            }
            Ok(())
        }
    }

    impl fmt::Display for SummingComponent {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "SummingComponent({})", self.total)
        }
    }

    fn run_summing(fail_on_finalize: bool) -> (Vec<i32>, usize) {
        let finalized = Arc::new(AtomicUsize::new(0));
        let component = SummingComponent {
            total: 0,
            finalized: Arc::clone(&finalized),
            fail_on_finalize,
        };
        let (in_tx, in_rx) = channel();
        let (out_tx, out_rx) = channel();
        let handle = run_component(Box::new(component), in_rx, out_tx);

        for n in [1, 2, 3] {
            in_tx.send(n).unwrap();
        }
        drop(in_tx);
        handle.join().unwrap();

        (out_rx.iter().collect(), finalized.load(Ordering::SeqCst))
    }

    #[test]
    fn finalize_runs_once_after_the_input_closes() {
        assert_eq!(run_summing(false), (vec![1, 3, 6], 1));
    }

    #[test]
    fn failed_finalize_still_ends_the_thread() {
        assert_eq!(run_summing(true), (vec![1, 3, 6], 1));
    }

    #[test]
    fn test_chained_component() {
        let (test_tx, block_a_rx) = channel::<i32>();
        let (block_a_tx, block_b_rx) = channel::<i32>();
        let (block_b_tx, test_rx) = channel::<i32>();

        run_component(Box::new(MockComponent {}), block_a_rx, block_a_tx);
        run_component(Box::new(MockComponent {}), block_b_rx, block_b_tx);

        assert_eq!(test_tx.send(0), Ok(()));
        assert_eq!(test_rx.recv(), Ok(2));
    }

    #[test]
    fn frames_to_text() {
        let (frame_tx, frame_rx) = channel::<u8>();
        let (event_tx, event_rx) = channel::<BrailleEvent>();
        let (text_tx, text_rx) = channel::<String>();

        let decoder = run_component(Box::new(BrailleDecoder::default()), frame_rx, event_tx);
        let line = run_component(Box::new(TypedLine::new()), event_rx, text_tx);

        // h, i, stray dot 6, backspace, confirm
        for frame in [0x32, 0x14, 0x01, 0x80, 0x40] {
            frame_tx.send(frame).unwrap();
        }
        drop(frame_tx);
        decoder.join().unwrap();
        line.join().unwrap();

        let snapshots: Vec<String> = text_rx.iter().collect();
        assert_eq!(snapshots, vec!["H", "HI", "HI", "H", "H "]);
    }
}
