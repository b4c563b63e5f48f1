mod chariter;
mod escape;
