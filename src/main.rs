use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use faces_dataset::{DatasetConfig, Entry, Error, FacesDataset, Label};
use rand::Rng;
use rayon::prelude::*;

/// Where to find the dataset: a root directory or a YAML descriptor.
#[derive(Parser, Debug)]
struct Source {
    #[clap(required_unless_present = "config")]
    root: Option<PathBuf>,
    /// Dataset descriptor; its resize and normalize settings apply to decoded samples
    #[clap(short, long, conflicts_with = "root")]
    config: Option<PathBuf>,
}

impl Source {
    fn config(&self) -> Result<Option<DatasetConfig>, Error> {
        self.config.as_deref().map(DatasetConfig::load).transpose()
    }

    fn root(&self) -> Result<PathBuf, Error> {
        match self.config()? {
            Some(config) => Ok(config.root),
            // clap rejects a missing root unless --config is given
            None => Ok(self.root.clone().unwrap_or_default()),
        }
    }
}

fn label_colored(label: Label) -> colored::ColoredString {
    match label {
        Label::Real => label.to_string().green(),
        Label::Fake => label.to_string().red(),
    }
}

#[derive(Parser, Debug)]
#[clap(about = "Print real/fake/total counts")]
struct Info {
    #[clap(flatten)]
    source: Source,
}

impl Info {
    fn exec(self) -> Result<(), Error> {
        let ds = FacesDataset::open(self.source.root()?)?;
        println!("root : {}", ds.root().display());
        println!("{}: {}", label_colored(Label::Real), ds.real_len());
        println!("{}: {}", label_colored(Label::Fake), ds.fake_len());
        println!("total: {}", ds.len().to_string().bold());
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[clap(about = "Decode one sample")]
struct Sample {
    #[clap(flatten)]
    source: Source,
    #[clap(short, long)]
    index: usize,
}

impl Sample {
    /// Decoded dimensions, label and path of the sample. With `--config` the
    /// descriptor's transform runs and the tensor shape is reported.
    fn describe(&self) -> Result<(String, Label, PathBuf), Error> {
        match self.source.config()? {
            Some(config) => {
                let ds = config.open()?;
                let (tensor, label) = ds.get(self.index)?;
                Ok((format!("{:?}", tensor.shape), label, ds.path_of(self.index)?))
            }
            None => {
                let ds = FacesDataset::open(self.source.root()?)?;
                let (image, label) = ds.get(self.index)?;
                let dims = format!("{}x{}", image.width(), image.height());
                Ok((dims, label, ds.path_of(self.index)?))
            }
        }
    }

    fn exec(self) -> Result<(), Error> {
        let (dims, label, path) = self.describe()?;
        println!("[{}] {} {} ({})", self.index, label_colored(label), path.display(), dims);
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[clap(about = "Decode uniformly random samples")]
struct Random {
    root: PathBuf,
    #[clap(short, long, default_value_t = 1)]
    count: usize,
}

impl Random {
    fn exec(self) -> Result<(), Error> {
        let ds = FacesDataset::open(&self.root)?;
        if ds.is_empty() {
            println!("{}", "dataset is empty".yellow());
            return Ok(());
        }

        let mut rng = rand::thread_rng();
        for _ in 0..self.count {
            let index = rng.gen_range(0..ds.len());
            let (image, label) = ds.get(index)?;
            println!("[{}] {} ({}x{})", index, label_colored(label), image.width(), image.height());
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[clap(about = "Decode every image and report the ones that fail")]
struct Verify {
    root: PathBuf,
}

/// Every index that fails to decode, in index order.
fn verify(ds: &FacesDataset) -> Vec<(usize, Error)> {
    (0..ds.len())
        .into_par_iter()
        .filter_map(|i| ds.get(i).err().map(|e| (i, e)))
        .collect()
}

impl Verify {
    fn exec(self) -> Result<bool, Error> {
        let ds = FacesDataset::open(&self.root)?;
        let failures = verify(&ds);

        for (index, err) in &failures {
            println!("{} [{}] {}", "failed".red().bold(), index, err);
        }
        println!(
            "{} of {} images decoded",
            (ds.len() - failures.len()).to_string().green(),
            ds.len()
        );
        Ok(failures.is_empty())
    }
}

#[derive(Parser, Debug)]
#[clap(about = "Write the index snapshot as JSON")]
struct Manifest {
    root: PathBuf,
    out: PathBuf,
}

/// Write the index snapshot to `out` as pretty JSON, returning the entry count.
fn write_manifest(ds: &FacesDataset, out: &Path) -> Result<usize, Error> {
    let entries: Vec<Entry> = ds.entries().collect();
    let json = serde_json::to_string_pretty(&entries)?;
    std::fs::write(out, json).map_err(|source| Error::Filesystem { path: out.to_path_buf(), source })?;
    Ok(entries.len())
}

impl Manifest {
    fn exec(self) -> Result<(), Error> {
        let ds = FacesDataset::open(&self.root)?;
        let count = write_manifest(&ds, &self.out)?;
        println!("wrote {} entries to {}", count, self.out.display());
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Inspect real/fake face image datasets")]
enum SubCommand {
    Info(Info),
    Sample(Sample),
    Random(Random),
    Verify(Verify),
    Manifest(Manifest),
}

fn main() {
    let result = match SubCommand::parse() {
        SubCommand::Info(info) => info.exec(),
        SubCommand::Sample(sample) => sample.exec(),
        SubCommand::Random(random) => random.exec(),
        SubCommand::Verify(verify) => match verify.exec() {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        SubCommand::Manifest(manifest) => manifest.exec(),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
