//! Pipe-passed detection

use super::pipes::PipeField;

/// Mark pipes whose trailing edge is now behind the bird as passed
///
/// Returns how many pipes were newly passed this tick.
pub fn collect_passed(pipes: &mut PipeField, bird_x: f32, pipe_width: f32) -> u64 {
    let mut passed = 0;
    for pipe in pipes.iter_mut().filter(|p| !p.passed) {
        if pipe.trailing_edge(pipe_width) < bird_x {
            pipe.passed = true;
            passed += 1;
        }
    }
    passed
}
