pub mod ffmpeg_audio_reader;
pub mod ffmpeg_mp3_writer;
pub mod ffmpeg_transcoder;
pub mod ytdlp_retriever;
