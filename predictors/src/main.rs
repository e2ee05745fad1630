use std::{fs, io};

use log::info;
use rand::{SeedableRng, rngs::StdRng};

use predictors::{
    Predictor, Result,
    batch::Batch,
    config::RunConfig,
    sink::{MemorySink, MetricsSink},
    trainer::Trainer,
};

fn synthetic_batches(rng: &mut StdRng, run: &RunConfig, count: usize) -> Result<Vec<Batch>> {
    (0..count)
        .map(|_| Batch::synthetic(rng, run.dataset, run.batch_size.get()))
        .collect()
}

fn main() -> io::Result<()> {
    env_logger::init();

    let run = RunConfig::from_env()?;
    info!(
        optimizer = run.predictor.optimizer.as_str(),
        dataset = run.dataset.tag();
        "starting run"
    );

    // The predictor only appends; the directory is the driver's to provide.
    fs::create_dir_all(&run.predictor.log_dir)?;

    let mut rng = match run.predictor.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let eval_batches = (run.batches.get() / 4).max(1);
    let train = synthetic_batches(&mut rng, &run, run.batches.get())?;
    let val = synthetic_batches(&mut rng, &run, eval_batches)?;
    let test = synthetic_batches(&mut rng, &run, eval_batches)?;

    let sink = MemorySink::new();
    let sink_handle: Box<dyn MetricsSink> = Box::new(sink.clone());
    let mut predictor = Predictor::from_config(run.dataset, run.predictor.clone(), sink_handle)?;

    let trainer = Trainer::new(run.epochs);
    let report = trainer.fit(&mut predictor, &train, &val)?;
    let test_loss = trainer.test(&mut predictor, &test)?;

    for (epoch, epoch_report) in report.epochs.iter().enumerate() {
        match epoch_report.val_loss {
            Some(val_loss) => println!(
                "epoch {epoch}: train loss {:.4}, val loss {val_loss:.4}",
                epoch_report.train_loss
            ),
            None => println!("epoch {epoch}: train loss {:.4}", epoch_report.train_loss),
        }
    }
    println!("test loss {test_loss:.4}");
    println!(
        "{} metrics reported, logs in {}",
        sink.len(),
        predictor.logs().dir().display()
    );

    Ok(())
}
