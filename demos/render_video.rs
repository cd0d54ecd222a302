use cldvideo::{
    CloudContext, PosterAsset, PosterSpec, RecordingHost, SourceType, TransformationStep,
    VideoBuilder, VideoInstance,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let ctx = CloudContext::with_cloud_name("demo");
    let mut instance = VideoInstance::new(RecordingHost::new());

    let mut poster = PosterAsset::new("elephants");
    poster.transformation = vec![
        TransformationStep::new().with("width", 100).with("crop", "scale"),
        TransformationStep::new().with("dpr", "2.0"),
    ];

    for public_id in ["dog", "dog", "cat"] {
        let props = VideoBuilder::new(public_id)
            .source_type(SourceType::Webm)
            .source_type(SourceType::Mp4)
            .source_transformation(
                SourceType::Webm,
                TransformationStep::new().with("overlay", "text:verdana_30:webm!"),
            )
            .transformation(TransformationStep::new().with("quality", 70))
            .poster(PosterSpec::Asset(poster.clone()))
            .attr("controls", true)
            .attr("playsInline", true)
            .fallback("Your browser does not support the video tag.")
            .build();

        let action = instance.render(&props, &ctx)?;
        println!("{public_id}: {action:?}");
    }

    if let Some(element) = instance.host().last() {
        println!("{}", serde_json::to_string_pretty(element)?);
    }
    Ok(())
}
