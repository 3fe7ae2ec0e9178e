pub mod effects {
    pub mod domain {
        pub mod dsp_engine;
        pub mod dsp_parameters;
        pub mod effect_chain;
        pub mod effect_preset;
    }
    pub mod infrastructure;
}

pub mod media {
    pub mod domain {
        pub mod audio_exporter;
        pub mod audio_segment;
        pub mod audio_transcoder;
        pub mod media_reference;
        pub mod video_retriever;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod input_provider;
    pub mod media_acquirer;
    pub mod path_resolver;
    pub mod pipeline_error;
    pub mod pipeline_logger;
    pub mod pipeline_state;
    pub mod remix_audio_use_case;
    pub mod validator;
    pub mod working_dir;
}

pub mod shared {
    pub mod constants;
    pub mod scratch_file;
}
