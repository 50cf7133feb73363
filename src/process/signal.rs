use libc::{signal, sighandler_t, SIGINT};

pub extern "C" fn ignore_sigint(_: i32) {
    // the foreground child owns SIGINT while it runs
}

pub fn pass_sigint_to_child() {
    unsafe {
        signal(SIGINT, ignore_sigint as sighandler_t);
    }
}
